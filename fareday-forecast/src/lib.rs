pub mod best_day;
pub mod features;

pub use best_day::{find_best_purchase_day, BestPurchaseDay, SearchOutcome};
pub use features::{ContextBuilder, PredictionContext, PredictionRequest};
