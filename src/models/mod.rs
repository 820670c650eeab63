pub mod block;
pub mod clock;
pub mod job_type;
pub mod piecework;
pub mod weekday;
pub mod worker;
