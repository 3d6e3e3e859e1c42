pub mod amount_serde;
pub mod analytics;
pub mod budget;
pub mod budget_data;
pub mod frequency;
pub mod month;
pub mod obligation;
pub mod record_id;
pub mod settings;
pub mod transaction;
