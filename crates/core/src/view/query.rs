use crate::classify;
use crate::domain::stock::StockRating;
use std::cmp::Ordering;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Ticker,
    Company,
    Brokerage,
    Time,
    TargetChange,
    RatingChange,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Ticker,
        SortKey::Company,
        SortKey::Brokerage,
        SortKey::Time,
        SortKey::TargetChange,
        SortKey::RatingChange,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Ticker => "ticker",
            SortKey::Company => "company",
            SortKey::Brokerage => "brokerage",
            SortKey::Time => "time",
            SortKey::TargetChange => "target-change",
            SortKey::RatingChange => "rating-change",
        }
    }

    fn compare(self, a: &StockRating, b: &StockRating) -> Ordering {
        match self {
            SortKey::Ticker => a.ticker.cmp(&b.ticker),
            SortKey::Company => a.company.to_lowercase().cmp(&b.company.to_lowercase()),
            SortKey::Brokerage => a.brokerage.to_lowercase().cmp(&b.brokerage.to_lowercase()),
            // Unparseable times sort first.
            SortKey::Time => {
                classify::parse_timestamp(&a.time).cmp(&classify::parse_timestamp(&b.time))
            }
            SortKey::TargetChange => target_change(a).total_cmp(&target_change(b)),
            SortKey::RatingChange => rating_delta(a).cmp(&rating_delta(b)),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = SortKey::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown sort key {s:?} (expected one of: {})", known.join(", "))
            })
    }
}

fn target_change(stock: &StockRating) -> f64 {
    classify::calculate_target_change(&stock.target_from, &stock.target_to)
}

fn rating_delta(stock: &StockRating) -> i16 {
    i16::from(classify::rating_level(&stock.rating_to))
        - i16::from(classify::rating_level(&stock.rating_from))
}

/// Search, sort and pagination state of the stocks table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockQuery {
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub descending: bool,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for StockQuery {
    fn default() -> Self {
        Self {
            search: None,
            sort: None,
            descending: false,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub items: Vec<&'a StockRating>,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    /// Matches across all pages.
    pub total: usize,
}

impl StockQuery {
    /// Case-insensitive substring match on ticker, company and brokerage.
    pub fn matches(&self, stock: &StockRating) -> bool {
        let Some(needle) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        else {
            return true;
        };

        let needle = needle.to_lowercase();
        [&stock.ticker, &stock.company, &stock.brokerage]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn apply<'a>(&self, stocks: &'a [StockRating]) -> Page<'a> {
        let mut matched: Vec<&StockRating> = stocks.iter().filter(|s| self.matches(s)).collect();

        if let Some(key) = self.sort {
            matched.sort_by(|a, b| {
                let ord = key.compare(a, b);
                if self.descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }

        let page_size = self.page_size.max(1);
        let page = self.page.max(1);
        let total = matched.len();
        let items = matched
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();

        Page {
            items,
            page,
            page_size,
            page_count: total.div_ceil(page_size).max(1),
            total,
        }
    }
}
