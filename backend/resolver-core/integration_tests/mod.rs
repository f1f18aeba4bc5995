mod end_to_end;
mod error;
mod log_targets;
