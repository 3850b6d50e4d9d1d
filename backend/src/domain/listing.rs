//! Listing predicates and sort orders.
//!
//! Every listing endpoint reduces to a [`ListingQuery`]: a [`RecipeFilter`]
//! that the store evaluates both for the page fetch and for the count that
//! bounds the offset, plus a [`RecipeSort`]. Keeping the two in one value is
//! what guarantees the count and the page agree.

use super::{CategoryName, Recipe};

/// Client selector for [`TimeBucket::HalfHour`].
pub const HALF_HOUR_SELECTOR: &str = "30";

/// Client selector for [`TimeBucket::UpToHour`].
pub const UP_TO_HOUR_SELECTOR: &str = "60";

/// Mutually exclusive total-time ranges, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeBucket {
    /// Total time of at most 30 minutes.
    HalfHour,
    /// Total time from 31 to 60 minutes inclusive.
    UpToHour,
    /// Total time of 61 minutes or more.
    OverHour,
}

impl TimeBucket {
    /// Resolve a client selector.
    ///
    /// Only the two named selectors pick a bounded bucket; every other value,
    /// including an empty one, selects the open-ended [`TimeBucket::OverHour`].
    ///
    /// # Examples
    /// ```
    /// use veggie_patch::domain::TimeBucket;
    ///
    /// assert_eq!(TimeBucket::from_selector("30"), TimeBucket::HalfHour);
    /// assert_eq!(TimeBucket::from_selector("60"), TimeBucket::UpToHour);
    /// assert_eq!(TimeBucket::from_selector("forever"), TimeBucket::OverHour);
    /// ```
    pub fn from_selector(selector: &str) -> Self {
        match selector.trim() {
            HALF_HOUR_SELECTOR => Self::HalfHour,
            UP_TO_HOUR_SELECTOR => Self::UpToHour,
            _ => Self::OverHour,
        }
    }

    /// Inclusive lower bound and optional inclusive upper bound.
    pub const fn bounds(self) -> (u32, Option<u32>) {
        match self {
            Self::HalfHour => (0, Some(30)),
            Self::UpToHour => (31, Some(60)),
            Self::OverHour => (61, None),
        }
    }

    /// Whether `total_time` falls inside this bucket.
    pub fn contains(self, total_time: u32) -> bool {
        let (low, high) = self.bounds();
        total_time >= low && high.is_none_or(|high| total_time <= high)
    }

    /// Human-readable label for pages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::HalfHour => "30 minutes or less",
            Self::UpToHour => "31 to 60 minutes",
            Self::OverHour => "over an hour",
        }
    }
}

/// Free-text search input, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Wrap user input; blank input is allowed and matches nothing.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_owned())
    }

    /// Lower-cased search terms split on whitespace.
    pub fn terms(&self) -> Vec<String> {
        self.0.split_whitespace().map(str::to_lowercase).collect()
    }
}

impl AsRef<str> for SearchQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Predicate evaluated by the recipe store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeFilter {
    /// Every recipe.
    All,
    /// Recipes in one category.
    Category(CategoryName),
    /// Full-text match over name and ingredients.
    Text(SearchQuery),
    /// Recipes in one category whose total time falls in a bucket.
    CategoryTime {
        category: CategoryName,
        bucket: TimeBucket,
    },
}

impl RecipeFilter {
    /// Reference evaluation of the predicate.
    ///
    /// Stores without native support evaluate filters through this method;
    /// the text arm approximates full-text search by requiring every term to
    /// appear, case-insensitively, in the name or an ingredient.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let details = recipe.details();
        match self {
            Self::All => true,
            Self::Category(category) => details.category() == category,
            Self::Text(query) => {
                let terms = query.terms();
                if terms.is_empty() {
                    return false;
                }
                let name = details.name().to_lowercase();
                let ingredients: Vec<String> =
                    details.ingredients().iter().map(|i| i.to_lowercase()).collect();
                terms.iter().all(|term| {
                    name.contains(term.as_str())
                        || ingredients.iter().any(|i| i.contains(term.as_str()))
                })
            }
            Self::CategoryTime { category, bucket } => {
                details.category() == category && bucket.contains(details.total_time())
            }
        }
    }
}

/// Sort order applied before skip/limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeSort {
    /// Category name ascending, then recipe name.
    CategoryName,
    /// Recipe name ascending.
    RecipeName,
    /// Store-defined relevance; not re-sorted by the service.
    Relevance,
}

/// Predicate and sort for one listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub filter: RecipeFilter,
    pub sort: RecipeSort,
}

impl ListingQuery {
    /// Landing page: every recipe ordered by category.
    pub fn landing() -> Self {
        Self {
            filter: RecipeFilter::All,
            sort: RecipeSort::CategoryName,
        }
    }

    /// Category page: recipes in `category` ordered by name.
    pub fn category(category: CategoryName) -> Self {
        Self {
            filter: RecipeFilter::Category(category),
            sort: RecipeSort::RecipeName,
        }
    }

    /// Text search in relevance order.
    pub fn search(query: SearchQuery) -> Self {
        Self {
            filter: RecipeFilter::Text(query),
            sort: RecipeSort::Relevance,
        }
    }

    /// Category plus time bucket, ordered by name.
    pub fn category_time(category: CategoryName, bucket: TimeBucket) -> Self {
        Self {
            filter: RecipeFilter::CategoryTime { category, bucket },
            sort: RecipeSort::RecipeName,
        }
    }
}
