use crate::domain::models::user::User;

/// Typed filter over the public photographer directory.
///
/// Every criterion is optional; an unset criterion matches everything and set
/// criteria are combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotographerFilter {
    categories: Option<Vec<String>>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    search: Option<String>,
}

impl PhotographerFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches photographers listing any of `categories`, and photographers
    /// that list no category at all.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let wanted: Vec<String> = categories
            .into_iter()
            .map(Into::into)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        self.categories = (!wanted.is_empty()).then_some(wanted);
        self
    }

    pub fn with_min_price(mut self, min: Option<f64>) -> Self {
        self.min_price = min;
        self
    }

    pub fn with_max_price(mut self, max: Option<f64>) -> Self {
        self.max_price = max;
        self
    }

    /// Case-insensitive substring match on name, specialty or location.
    pub fn with_search(mut self, term: Option<&str>) -> Self {
        self.search = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);
        self
    }

    pub fn matches(&self, user: &User) -> bool {
        self.matches_categories(user) && self.matches_price(user) && self.matches_search(user)
    }

    pub fn apply(&self, users: Vec<User>) -> Vec<User> {
        users.into_iter().filter(|u| self.matches(u)).collect()
    }

    fn matches_categories(&self, user: &User) -> bool {
        let Some(wanted) = &self.categories else { return true };
        user.categories.is_empty() || user.categories.iter().any(|c| wanted.contains(c))
    }

    fn matches_price(&self, user: &User) -> bool {
        if self.min_price.is_none() && self.max_price.is_none() {
            return true;
        }
        let Some(price) = user.price else { return false };
        self.min_price.is_none_or(|min| price >= min) && self.max_price.is_none_or(|max| price <= max)
    }

    fn matches_search(&self, user: &User) -> bool {
        let Some(term) = &self.search else { return true };
        [Some(&user.full_name), user.specialty.as_ref(), user.location.as_ref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(term))
    }
}
