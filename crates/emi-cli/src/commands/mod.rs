pub mod emi;
pub mod loan;
