/// Availability of a book as shown to readers.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum LoanStatus {
    Available,
    OnLoan,
}

impl LoanStatus {
    /// Style tag handed to the view renderer.
    pub fn tag(&self) -> &'static str {
        match self {
            LoanStatus::Available => "available",
            LoanStatus::OnLoan => "on-loan",
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, LoanStatus::Available)
    }
}
