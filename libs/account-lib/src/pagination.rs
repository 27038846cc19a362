//! Paging and sorting requests.
//!
//! Sort keys arrive as strings (`sort=login,desc`) and are resolved against a
//! closed set of fields per entity. A property outside that set rejects the
//! whole request, so columns such as `password_hash` or `reset_key` can never
//! reach an `ORDER BY` clause.

use std::fmt;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    #[error("sort property '{0}' is not allowed")]
    DisallowedProperty(String),
}

/// A field an entity can be ordered by.
pub trait SortField: Copy + PartialEq + fmt::Debug + Send + Sync {
    /// Resolves a public property name; `None` when it is not sortable.
    fn from_property(property: &str) -> Option<Self>;

    fn property(&self) -> &'static str;

    fn column(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order<F> {
    pub field: F,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort<F> {
    orders: Vec<Order<F>>,
}

impl<F> Default for Sort<F> {
    fn default() -> Self {
        Self { orders: Vec::new() }
    }
}

impl<F: SortField> Sort<F> {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(field: F, direction: Direction) -> Self {
        Self::unsorted().and(field, direction)
    }

    pub fn and(mut self, field: F, direction: Direction) -> Self {
        self.orders.push(Order { field, direction });
        self
    }

    pub fn orders(&self) -> &[Order<F>] {
        &self.orders
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    /// Parses repeated `sort` query values.
    ///
    /// Each value is `prop[,prop...][,asc|desc]`. Blank tokens are skipped and
    /// a value carrying only a direction adds nothing.
    pub fn parse<I, T>(params: I) -> Result<Self, SortError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut sort = Self::unsorted();

        for param in params {
            let tokens: Vec<&str> = param
                .as_ref()
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect();

            let Some((last, rest)) = tokens.split_last() else {
                continue;
            };

            let (properties, direction) = match Direction::from_token(last) {
                Some(direction) => (rest, direction),
                None => (tokens.as_slice(), Direction::Asc),
            };

            for property in properties {
                let field = F::from_property(property)
                    .ok_or_else(|| SortError::DisallowedProperty((*property).to_string()))?;
                sort = sort.and(field, direction);
            }
        }

        Ok(sort)
    }

    /// Renders an `ORDER BY` body, appending `tie_breaker ASC` when absent.
    pub fn to_order_by(&self, tie_breaker: F) -> String {
        let mut clauses: Vec<String> = self
            .orders
            .iter()
            .map(|o| format!("{} {}", o.field.column(), o.direction.as_sql()))
            .collect();

        if !self.orders.iter().any(|o| o.field == tie_breaker) {
            clauses.push(format!("{} {}", tie_breaker.column(), Direction::Asc.as_sql()));
        }

        clauses.join(", ")
    }
}

/// Properties of a user that the public listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortField {
    Id,
    Login,
    FirstName,
    LastName,
    Email,
    Activated,
    LangKey,
}

impl UserSortField {
    pub const ALL: [UserSortField; 7] = [
        UserSortField::Id,
        UserSortField::Login,
        UserSortField::FirstName,
        UserSortField::LastName,
        UserSortField::Email,
        UserSortField::Activated,
        UserSortField::LangKey,
    ];
}

impl SortField for UserSortField {
    fn from_property(property: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.property() == property)
    }

    fn property(&self) -> &'static str {
        match self {
            UserSortField::Id => "id",
            UserSortField::Login => "login",
            UserSortField::FirstName => "firstName",
            UserSortField::LastName => "lastName",
            UserSortField::Email => "email",
            UserSortField::Activated => "activated",
            UserSortField::LangKey => "langKey",
        }
    }

    fn column(&self) -> &'static str {
        match self {
            UserSortField::Id => "id",
            UserSortField::Login => "login",
            UserSortField::FirstName => "first_name",
            UserSortField::LastName => "last_name",
            UserSortField::Email => "email",
            UserSortField::Activated => "activated",
            UserSortField::LangKey => "lang_key",
        }
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationParams<F = UserSortField> {
    pub page: u32,
    pub page_size: u32,
    pub sort: Sort<F>,
}

impl<F: SortField> PaginationParams<F> {
    /// Missing or zero sizes fall back to the default; oversized ones are clamped.
    pub fn new(page: Option<u32>, page_size: Option<u32>, sort: Sort<F>) -> Self {
        let page_size = match page_size {
            Some(0) | None => DEFAULT_PAGE_SIZE,
            Some(size) => size.min(MAX_PAGE_SIZE),
        };
        Self {
            page: page.unwrap_or(0),
            page_size,
            sort,
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.page_size)
    }
}

impl<F: SortField> Default for PaginationParams<F> {
    fn default() -> Self {
        Self::new(None, None, Sort::unsorted())
    }
}
