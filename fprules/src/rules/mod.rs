pub mod generate;
pub mod rule;


pub use generate::{generate_rules, sort_rules};
pub use rule::AssociationRule;
