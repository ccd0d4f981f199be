// The seven content resources, as a closed enum.
//
// Maps each kind to its `exameets-api` route descriptor and provides
// the display names consumers use for sections and CLI arguments.

use exameets_api::{ResourceRoute, routes};
use strum::{Display, EnumIter, EnumString};

/// One content resource of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ResourceKind {
    Jobs,
    GovtJobs,
    Exams,
    Scholarships,
    AdmitCards,
    Admissions,
    PreviousYearPapers,
}

impl ResourceKind {
    /// The API route descriptor for this kind.
    pub fn route(self) -> &'static ResourceRoute {
        match self {
            Self::Jobs => &routes::JOB,
            Self::GovtJobs => &routes::GOVT_JOB,
            Self::Exams => &routes::EXAM,
            Self::Scholarships => &routes::SCHOLARSHIP,
            Self::AdmitCards => &routes::ADMIT_CARD,
            Self::Admissions => &routes::ADMISSION,
            Self::PreviousYearPapers => &routes::PREVIOUS_YEAR_PAPER,
        }
    }

    /// Human-facing section title (what's-new headings, table captions).
    pub fn title(self) -> &'static str {
        match self {
            Self::Jobs => "Tech Jobs",
            Self::GovtJobs => "Government Jobs",
            Self::Exams => "Exams",
            Self::Scholarships => "Scholarships",
            Self::AdmitCards => "Admit Cards",
            Self::Admissions => "Admissions",
            Self::PreviousYearPapers => "Previous Year Papers",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn kebab_case_round_trip() {
        for kind in ResourceKind::iter() {
            let name = kind.to_string();
            assert_eq!(ResourceKind::from_str(&name).unwrap(), kind);
        }
        assert_eq!(ResourceKind::GovtJobs.to_string(), "govt-jobs");
    }

    #[test]
    fn every_kind_has_a_route() {
        for kind in ResourceKind::iter() {
            assert!(!kind.route().path.is_empty());
        }
    }
}
