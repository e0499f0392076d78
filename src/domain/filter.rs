use std::collections::BTreeMap;

use crate::categories::PrimaryCategory;
use crate::entities::project::Project;

/// Sub-category value meaning "no sub-category filter".
pub const ALL_SUB_CATEGORIES: &str = "All";

/// The three independent selectors of the project browser. Filtering is a
/// pure projection over this value and a project list; nothing here touches
/// the store or any ambient state.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    pub primary: PrimaryCategory,
    pub sub_category: String,
    pub query: String,
}

impl Default for FilterSelection {
    fn default() -> Self {
        FilterSelection {
            primary: PrimaryCategory::All,
            sub_category: ALL_SUB_CATEGORIES.to_string(),
            query: String::new(),
        }
    }
}

impl FilterSelection {
    /// Selecting a primary category always resets the sub-category, so a
    /// sub-category can never be carried across primaries.
    pub fn select_primary(&mut self, primary: PrimaryCategory) {
        self.primary = primary;
        self.sub_category = ALL_SUB_CATEGORIES.to_string();
    }

    pub fn select_sub_category(&mut self, sub_category: impl Into<String>) {
        self.sub_category = sub_category.into();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn is_default(&self) -> bool {
        self.primary == PrimaryCategory::All
            && self.sub_category == ALL_SUB_CATEGORIES
            && self.query.is_empty()
    }

    /// Conjunctive match: primary, then sub-category, then free-text query.
    ///
    /// The sub-category comparison does not re-validate that the stored value
    /// is a legal member of the project's primary scope; a mismatch simply
    /// never matches. The query is a case-insensitive substring over title,
    /// description, and each technology entry.
    pub fn matches(&self, project: &Project) -> bool {
        if self.primary != PrimaryCategory::All
            && project.primary_category != self.primary.as_str()
        {
            return false;
        }

        if self.sub_category != ALL_SUB_CATEGORIES
            && project.sub_category != self.sub_category
        {
            return false;
        }

        if !self.query.is_empty() {
            let needle = self.query.to_lowercase();
            let hit = project.title.to_lowercase().contains(&needle)
                || project.description.to_lowercase().contains(&needle)
                || project
                    .technologies
                    .iter()
                    .any(|tech| tech.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|project| self.matches(project)).collect()
    }

    /// Serializes the selection into the page's query string, omitting every
    /// parameter that equals its default so a fully-default selection yields
    /// an empty string.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();

        if self.primary != PrimaryCategory::All {
            pairs.push(format!("category={}", urlencoding::encode(self.primary.as_str())));
        }
        if self.sub_category != ALL_SUB_CATEGORIES {
            pairs.push(format!("subCategory={}", urlencoding::encode(&self.sub_category)));
        }
        if !self.query.is_empty() {
            pairs.push(format!("search={}", urlencoding::encode(&self.query)));
        }

        pairs.join("&")
    }

    /// Reconstructs a selection from a page URL's query string. Lenient on
    /// purpose: an unrecognized `category` value falls back to `All`, and
    /// unknown parameters are ignored.
    pub fn from_query_string(query: &str) -> Self {
        let mut selection = FilterSelection::default();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "category" => {
                    if let Ok(primary) = value.parse::<PrimaryCategory>() {
                        selection.primary = primary;
                    }
                }
                "subCategory" => selection.sub_category = value.into_owned(),
                "search" => selection.query = value.into_owned(),
                _ => {}
            }
        }

        selection
    }
}

/// Per-primary-category project counts used to annotate filter buttons.
///
/// "All" maps to the total list length; every other primary maps to the count
/// of projects with that exact primary category, ignoring sub-category and
/// query.
pub fn category_counts(projects: &[Project]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    counts.insert(PrimaryCategory::All.to_string(), projects.len());

    for category in PrimaryCategory::ALL {
        if category == PrimaryCategory::All {
            continue;
        }
        let count = projects
            .iter()
            .filter(|project| project.primary_category == category.as_str())
            .count();
        counts.insert(category.to_string(), count);
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn project(slug: &str, title: &str, primary: &str, sub: &str, technologies: &[&str]) -> Project {
        Project {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            title: title.to_string(),
            description: format!("{title} description"),
            content: String::new(),
            image_url: None,
            technologies: technologies.iter().map(|t| t.to_string()).collect(),
            primary_category: primary.to_string(),
            sub_category: sub.to_string(),
            github_url: None,
            live_url: None,
            featured: false,
            created_at: Utc::now(),
        }
    }

    fn sample_projects() -> Vec<Project> {
        vec![
            project("shop", "Fashion Store", "Web Applications", "E-commerce Platform", &["Next.js", "React", "Stripe"]),
            project("modbot", "Moderation Bot", "Bots", "Moderation Bot", &["Rust", "Serenity"]),
            project("notify", "Notifier", "Bots", "Notification Bot", &["Python"]),
        ]
    }

    #[test]
    fn default_selection_keeps_everything() {
        let projects = sample_projects();
        let selection = FilterSelection::default();
        assert_eq!(selection.apply(&projects).len(), 3);
    }

    #[test]
    fn filtering_is_deterministic_and_idempotent() {
        let projects = sample_projects();
        let mut selection = FilterSelection::default();
        selection.select_primary(PrimaryCategory::Bots);
        selection.set_query("bot");

        let first: Vec<String> = selection.apply(&projects).iter().map(|p| p.slug.clone()).collect();
        let second: Vec<String> = selection.apply(&projects).iter().map(|p| p.slug.clone()).collect();
        assert_eq!(first, second);

        // Filtering the filtered subset again with the same selectors is a fixpoint.
        let filtered: Vec<Project> = selection.apply(&projects).into_iter().cloned().collect();
        let refiltered: Vec<String> = selection.apply(&filtered).iter().map(|p| p.slug.clone()).collect();
        assert_eq!(first, refiltered);
    }

    #[test]
    fn selecting_a_primary_resets_the_sub_category() {
        let mut selection = FilterSelection::default();
        selection.select_primary(PrimaryCategory::WebApplications);
        selection.select_sub_category("E-commerce Platform");
        assert_eq!(selection.sub_category, "E-commerce Platform");

        selection.select_primary(PrimaryCategory::Bots);
        assert_eq!(selection.sub_category, ALL_SUB_CATEGORIES);
    }

    #[test]
    fn sub_category_filter_applies_without_taxonomy_validation() {
        let projects = sample_projects();
        let mut selection = FilterSelection::default();
        selection.select_primary(PrimaryCategory::Bots);
        // Legal for Web Applications, not for Bots: yields no match, not an error.
        selection.select_sub_category("E-commerce Platform");
        assert!(selection.apply(&projects).is_empty());
    }

    #[test]
    fn query_is_case_insensitive() {
        let projects = sample_projects();

        let mut upper = FilterSelection::default();
        upper.set_query("REACT");
        let mut lower = FilterSelection::default();
        lower.set_query("react");

        let upper_slugs: Vec<&str> = upper.apply(&projects).iter().map(|p| p.slug.as_str()).collect();
        let lower_slugs: Vec<&str> = lower.apply(&projects).iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(upper_slugs, lower_slugs);
        assert_eq!(upper_slugs, vec!["shop"]);
    }

    #[test]
    fn query_matches_title_description_and_technologies() {
        let projects = sample_projects();

        let mut by_title = FilterSelection::default();
        by_title.set_query("fashion");
        assert_eq!(by_title.apply(&projects).len(), 1);

        let mut by_tech = FilterSelection::default();
        by_tech.set_query("stripe");
        assert_eq!(by_tech.apply(&projects)[0].slug, "shop");

        let mut miss = FilterSelection::default();
        miss.set_query("kubernetes");
        assert!(miss.apply(&projects).is_empty());
    }

    #[test]
    fn bots_scenario_filters_and_counts() {
        let projects = vec![
            project("web", "Site", "Web Applications", "Corporate Website", &[]),
            project("bot-a", "Bot A", "Bots", "Utility Bot", &[]),
            project("bot-b", "Bot B", "Bots", "Moderation Bot", &[]),
        ];

        let mut selection = FilterSelection::default();
        selection.select_primary(PrimaryCategory::Bots);
        let filtered = selection.apply(&projects);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|p| p.primary_category == "Bots"));

        let counts = category_counts(&projects);
        assert_eq!(counts["All"], 3);
        assert_eq!(counts["Web Applications"], 1);
        assert_eq!(counts["Bots"], 2);
        assert_eq!(counts["Mobile Applications"], 0);
        assert_eq!(counts["AI & Machine Learning"], 0);
    }

    #[test]
    fn counts_sum_to_total_when_categories_partition() {
        let projects = sample_projects();
        let counts = category_counts(&projects);
        assert_eq!(counts["All"], projects.len());

        let sum: usize = counts
            .iter()
            .filter(|(name, _)| name.as_str() != "All")
            .map(|(_, count)| count)
            .sum();
        assert_eq!(sum, projects.len());
    }

    #[test]
    fn counts_ignore_sub_category_and_query() {
        let projects = sample_projects();
        // Counts are a function of the list alone; any selection sees the same map.
        let counts = category_counts(&projects);
        assert_eq!(counts["Bots"], 2);
    }

    #[test]
    fn query_string_omits_defaults() {
        let selection = FilterSelection::default();
        assert_eq!(selection.to_query_string(), "");

        let mut bots = FilterSelection::default();
        bots.select_primary(PrimaryCategory::Bots);
        assert_eq!(bots.to_query_string(), "category=Bots");

        let mut full = FilterSelection::default();
        full.select_primary(PrimaryCategory::WebApplications);
        full.select_sub_category("SaaS Product");
        full.set_query("react app");
        assert_eq!(
            full.to_query_string(),
            "category=Web%20Applications&subCategory=SaaS%20Product&search=react%20app"
        );
    }

    #[test]
    fn query_string_round_trips() {
        let mut selection = FilterSelection::default();
        selection.select_primary(PrimaryCategory::BackendApis);
        selection.select_sub_category("GraphQL API");
        selection.set_query("social & realtime");

        let encoded = selection.to_query_string();
        assert_eq!(FilterSelection::from_query_string(&encoded), selection);
    }

    #[test]
    fn from_query_string_falls_back_to_all_for_unknown_category() {
        let selection = FilterSelection::from_query_string("category=Nope&search=x");
        assert_eq!(selection.primary, PrimaryCategory::All);
        assert_eq!(selection.query, "x");
    }
}
