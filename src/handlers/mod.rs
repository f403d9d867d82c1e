pub mod cases;
pub mod run;
