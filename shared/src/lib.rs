//! Wire representations shared by the account service and its clients.
//!
//! Field names follow the JSON the service speaks (camelCase), which is also
//! the attribute vocabulary the capability query parameters refer to.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRepresentation {
    /// Four-digit registration number
    pub reg_no: String,
    pub account_no: String,
    pub name: String,
    pub balance: f64,
    /// Time of the last change to the account (RFC 3339)
    pub last_update: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRepresentation {
    pub id: String,
    pub amount: f64,
    /// Description of the transaction (max 256 characters)
    pub description: String,
    /// Booking time (RFC 3339)
    pub date: String,
}

/// Reduced transaction view used when transactions are embedded sparsely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseTransactionRepresentation {
    pub id: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRepresentation {
    pub id: String,
    /// Position of the event in the global event stream
    pub sequence: i64,
    pub category: String,
    /// Path of the resource the event is about
    pub origin: String,
    pub information: String,
    /// Time the event happened (RFC 3339)
    pub time: String,
}

/// Static description of the event stream, served next to the events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsMetadataRepresentation {
    pub metadata: EventsMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsMetadata {
    pub description: String,
    pub purpose: String,
    #[serde(rename = "supported-versions")]
    pub supported_versions: String,
}

/// Body of `PUT /accounts/{regNo}-{accountNo}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdateRequest {
    pub reg_no: String,
    pub account_no: String,
    pub name: String,
}

/// Body of `PUT /accounts/{regNo}-{accountNo}/transactions/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdateRequest {
    pub description: String,
    /// Decimal amount as text, e.g. "-123.45"
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_uses_camel_case() {
        let account = AccountRepresentation {
            reg_no: "5479".to_string(),
            account_no: "1234".to_string(),
            name: "Checking account".to_string(),
            balance: 10.5,
            last_update: "2016-10-14T00:00:00+00:00".to_string(),
        };
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["regNo"], "5479");
        assert_eq!(json["accountNo"], "1234");
        assert_eq!(json["lastUpdate"], "2016-10-14T00:00:00+00:00");
    }

    #[test]
    fn test_update_requests_deserialize() {
        let account: AccountUpdateRequest =
            serde_json::from_str(r#"{"regNo":"5479","accountNo":"1234","name":"new"}"#).unwrap();
        assert_eq!(account.name, "new");

        let transaction: TransactionUpdateRequest =
            serde_json::from_str(r#"{"description":"Coffee","amount":"-12.50"}"#).unwrap();
        assert_eq!(transaction.amount, "-12.50");
    }
}
