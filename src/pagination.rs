//! Paging primitives shared by the repository, services and routes.

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 2000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Ordering requested by the caller, e.g. `title,desc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sort {
    pub property: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parses `property[,asc|desc]`; the direction defaults to ascending.
    pub fn parse(raw: &str) -> Result<Self, TypeConstraintError> {
        let mut parts = raw.split(',').map(str::trim);
        let property = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or(TypeConstraintError::EmptyString)?;
        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("") | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(_) => {
                return Err(TypeConstraintError::InvalidValue(format!("sort={raw}")));
            }
        };
        Ok(Self {
            property: property.to_string(),
            direction,
        })
    }
}

/// Raw paging query parameters: `page` (zero-based), `size` and `sort`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub sort: Option<String>,
}

/// Validated request for one page of results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort: Option<Sort>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

impl PageRequest {
    /// Creates a request, clamping the size into `1..=MAX_PAGE_SIZE`.
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort: None,
        }
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl TryFrom<PageParams> for PageRequest {
    type Error = TypeConstraintError;

    fn try_from(params: PageParams) -> Result<Self, Self::Error> {
        let request = PageRequest::new(
            params.page.unwrap_or(0),
            params.size.unwrap_or(DEFAULT_PAGE_SIZE),
        );
        match params.sort.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Ok(request.sort(Sort::parse(raw)?)),
            None => Ok(request),
        }
    }
}

/// One page of results plus the total number of matching records.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub size: usize,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total: usize) -> Self {
        Self {
            content,
            total,
            page: request.page,
            size: request.size,
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.size == 0 {
            0
        } else {
            self.total.div_ceil(self.size)
        }
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_defaults_and_clamps() {
        let request = PageRequest::try_from(PageParams::default()).unwrap();
        assert_eq!(request, PageRequest::new(0, DEFAULT_PAGE_SIZE));

        let request = PageRequest::try_from(PageParams {
            page: Some(3),
            size: Some(0),
            sort: None,
        })
        .unwrap();
        assert_eq!(request.size, 1);
        assert_eq!(request.offset(), 3);

        assert_eq!(PageRequest::new(0, 1_000_000).size, MAX_PAGE_SIZE);
    }

    #[test]
    fn sort_parses_direction() {
        assert_eq!(Sort::parse("title").unwrap(), Sort::asc("title"));
        assert_eq!(Sort::parse("title,DESC").unwrap(), Sort::desc("title"));
        assert!(Sort::parse("title,sideways").is_err());
        assert!(Sort::parse(",asc").is_err());
    }

    #[test]
    fn page_reports_total_pages_and_neighbours() {
        let request = PageRequest::new(1, 10);
        let page = Page::new(vec![1; 10], &request, 25);

        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(page.has_previous());

        let last = Page::new(vec![1; 5], &PageRequest::new(2, 10), 25);
        assert!(!last.has_next());

        let far: Page<i32> = Page::new(vec![], &PageRequest::new(usize::MAX, 10), 25);
        assert!(!far.has_next());
        assert!(far.has_previous());

        let empty: Page<i32> = Page::new(vec![], &PageRequest::default(), 0);
        assert_eq!(empty.total_pages(), 0);
        assert!(!empty.has_next());
        assert!(!empty.has_previous());
    }
}
