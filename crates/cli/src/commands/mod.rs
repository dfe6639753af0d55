pub mod onboard;
pub mod wizard;
