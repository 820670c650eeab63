pub mod assignment;
pub mod clock;
pub mod fast;
pub mod policy;
pub mod sweep;
pub mod sync;
pub mod totals;
