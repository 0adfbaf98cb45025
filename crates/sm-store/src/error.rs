use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no product {name:?} from brand {brand:?}")]
    UnknownProduct { name: String, brand: String },

    #[error("only {available} of {name:?} ({brand}) in stock, {requested} requested")]
    InsufficientStock {
        name:      String,
        brand:     String,
        requested: u32,
        available: u32,
    },

    #[error("returning {qty} of {name:?} ({brand}) would overflow its stock")]
    StockOverflow { name: String, brand: String, qty: u32 },

    #[error("{name:?} ({brand}) is not in the cart")]
    NotInCart { name: String, brand: String },

    #[error("quantity must be positive")]
    InvalidQuantity,

    #[error("cart is empty")]
    EmptyCart,

    #[error("store JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
