pub mod repeat_rule;
pub mod task_date;
