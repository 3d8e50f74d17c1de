pub mod dashboard;
pub mod my_leaves;
