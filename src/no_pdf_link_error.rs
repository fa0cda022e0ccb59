#[derive(Debug)]
pub struct NoPdfLinkFoundError;

impl std::fmt::Display for NoPdfLinkFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "No timetable PDF link was found on the listing page!")
    }
}

impl std::error::Error for NoPdfLinkFoundError {}
