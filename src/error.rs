use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Unknown column '{column}' in {table}")]
    UnknownColumn { table: String, column: String },

    #[error("Empty filter predicate for view '{0}'")]
    EmptyPredicate(String),

    #[error("Bad predicate '{0}', expected column=text")]
    BadPredicate(String),

    #[error("No earlier filter to restore for view '{0}'")]
    NoHistory(String),

    #[error("Table '{0}' has not been loaded")]
    MissingTable(String),

    #[error("No journal rows for voucher '{voucher_id}' on {date}")]
    VoucherNotFound { voucher_id: String, date: String },

    #[error("Import error: {0}")]
    Import(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, AuditError>;
