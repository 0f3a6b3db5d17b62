use crate::domain::models::{Account, Event, Transaction};
use shared::{
    AccountRepresentation, EventRepresentation, SparseTransactionRepresentation,
    TransactionRepresentation,
};

pub struct AccountMapper;

impl AccountMapper {
    pub fn to_dto(domain: Account) -> AccountRepresentation {
        AccountRepresentation {
            reg_no: domain.reg_no,
            account_no: domain.account_no,
            name: domain.name,
            balance: domain.balance,
            last_update: domain.last_update.to_rfc3339(),
        }
    }
}

pub struct TransactionMapper;

impl TransactionMapper {
    pub fn to_dto(domain: Transaction) -> TransactionRepresentation {
        TransactionRepresentation {
            id: domain.id,
            amount: domain.amount,
            description: domain.description,
            date: domain.date.to_rfc3339(),
        }
    }

    pub fn to_sparse_dto(domain: Transaction) -> SparseTransactionRepresentation {
        SparseTransactionRepresentation {
            id: domain.id,
            amount: domain.amount,
        }
    }
}

pub struct EventMapper;

impl EventMapper {
    pub fn to_dto(domain: Event) -> EventRepresentation {
        EventRepresentation {
            id: domain.id,
            sequence: domain.sequence,
            category: domain.category,
            origin: domain.origin,
            information: domain.information,
            time: domain.time.to_rfc3339(),
        }
    }
}
