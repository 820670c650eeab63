pub mod checkin;
pub mod checkout;
pub mod clear;
pub mod clockin;
pub mod clockout;
pub mod earliest;
pub mod fast_checkin;
pub mod init;
pub mod job_types;
pub mod log;
pub mod monitor;
pub mod remaining;
pub mod seed_block;
pub mod status;
pub mod swap;
pub mod sweep;
pub mod sync;
pub mod totals;
