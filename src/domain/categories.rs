use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level project classification. `All` is a real member of the set: it is
/// the default selection and the catch-all bucket of the count map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimaryCategory {
    #[serde(rename = "All")]
    All,
    #[serde(rename = "Web Applications")]
    WebApplications,
    #[serde(rename = "Mobile Applications")]
    MobileApplications,
    #[serde(rename = "Backend & APIs")]
    BackendApis,
    #[serde(rename = "Bots")]
    Bots,
    #[serde(rename = "AI & Machine Learning")]
    AiMachineLearning,
    #[serde(rename = "DevOps & Infrastructure")]
    DevopsInfrastructure,
    #[serde(rename = "Personal/Experimental")]
    PersonalExperimental,
}

#[derive(Debug, Display)]
#[display("Unknown category: {_0}")]
pub struct UnknownCategory(pub String);

impl PrimaryCategory {
    /// Every primary category, in display order. `All` comes first.
    pub const ALL: [PrimaryCategory; 8] = [
        PrimaryCategory::All,
        PrimaryCategory::WebApplications,
        PrimaryCategory::MobileApplications,
        PrimaryCategory::BackendApis,
        PrimaryCategory::Bots,
        PrimaryCategory::AiMachineLearning,
        PrimaryCategory::DevopsInfrastructure,
        PrimaryCategory::PersonalExperimental,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryCategory::All => "All",
            PrimaryCategory::WebApplications => "Web Applications",
            PrimaryCategory::MobileApplications => "Mobile Applications",
            PrimaryCategory::BackendApis => "Backend & APIs",
            PrimaryCategory::Bots => "Bots",
            PrimaryCategory::AiMachineLearning => "AI & Machine Learning",
            PrimaryCategory::DevopsInfrastructure => "DevOps & Infrastructure",
            PrimaryCategory::PersonalExperimental => "Personal/Experimental",
        }
    }

    /// Sub-categories scoped to this primary. Every non-`All` scope carries
    /// its own "All" entry at the front; `All` itself has no sub-categories.
    pub fn sub_categories(&self) -> &'static [&'static str] {
        match self {
            PrimaryCategory::All => &[],
            PrimaryCategory::WebApplications => &[
                "All",
                "Corporate Website",
                "E-commerce Platform",
                "SaaS Product",
                "Dashboard",
                "Landing Page",
                "PWA",
            ],
            PrimaryCategory::MobileApplications => &[
                "All",
                "iOS Native",
                "Android Native",
                "React Native",
                "Flutter",
            ],
            PrimaryCategory::BackendApis => &[
                "All",
                "REST API",
                "GraphQL API",
                "Microservices",
                "Authentication Systems",
                "Real-time Services",
                "Serverless",
            ],
            PrimaryCategory::Bots => &[
                "All",
                "Utility Bot",
                "Moderation Bot",
                "Entertainment Bot",
                "Notification Bot",
            ],
            PrimaryCategory::AiMachineLearning => &[
                "All",
                "Computer Vision",
                "NLP",
                "Recommendation Systems",
                "Predictive Analytics",
                "Generative AI",
                "LLM Integration",
            ],
            PrimaryCategory::DevopsInfrastructure => &[
                "All",
                "CI/CD Pipelines",
                "Cloud Infrastructure",
                "Docker & Kubernetes",
                "Monitoring & Logging",
                "Terraform",
            ],
            PrimaryCategory::PersonalExperimental => &[
                "All",
                "Side Project",
                "Hackathon",
                "Proof of Concept",
                "Fun Tool",
                "Experiment",
            ],
        }
    }

    /// Display-color token clients map to their own chip styling.
    pub fn color(&self) -> &'static str {
        match self {
            PrimaryCategory::All => "gray",
            PrimaryCategory::WebApplications => "blue",
            PrimaryCategory::MobileApplications => "purple",
            PrimaryCategory::BackendApis => "green",
            PrimaryCategory::Bots => "yellow",
            PrimaryCategory::AiMachineLearning => "red",
            PrimaryCategory::DevopsInfrastructure => "cyan",
            PrimaryCategory::PersonalExperimental => "pink",
        }
    }
}

impl fmt::Display for PrimaryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PrimaryCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrimaryCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_has_eight_primaries_including_all() {
        assert_eq!(PrimaryCategory::ALL.len(), 8);
        assert_eq!(PrimaryCategory::ALL[0], PrimaryCategory::All);
    }

    #[test]
    fn every_sub_category_scope_starts_with_all() {
        for category in PrimaryCategory::ALL {
            if category == PrimaryCategory::All {
                assert!(category.sub_categories().is_empty());
            } else {
                assert_eq!(category.sub_categories()[0], "All");
            }
        }
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for category in PrimaryCategory::ALL {
            assert_eq!(category.to_string().parse::<PrimaryCategory>().unwrap(), category);
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!("Desktop Applications".parse::<PrimaryCategory>().is_err());
        // Matching is exact, not case-insensitive.
        assert!("bots".parse::<PrimaryCategory>().is_err());
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&PrimaryCategory::BackendApis).unwrap();
        assert_eq!(json, "\"Backend & APIs\"");
        let parsed: PrimaryCategory = serde_json::from_str("\"Web Applications\"").unwrap();
        assert_eq!(parsed, PrimaryCategory::WebApplications);
    }

    #[test]
    fn every_primary_has_a_color_token() {
        let colors: Vec<&str> = PrimaryCategory::ALL.iter().map(|c| c.color()).collect();
        assert_eq!(colors.len(), 8);
        assert!(colors.iter().all(|c| !c.is_empty()));
    }
}
