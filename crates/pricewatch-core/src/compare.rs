//! Unit-price ranking for curated product comparisons.
//!
//! A comparison holds differently-sized packages of the same kind of thing;
//! the only fair ordering is price per unit of size. The storage layer
//! attaches each member's lowest observed price and calls into here for the
//! pure ranking math.

use std::cmp::Ordering;

/// Computed ordering for one comparison's members.
///
/// `order` holds indices into the caller's member slice, sorted ascending by
/// unit price with unpriced members last (ties keep their input order).
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub order: Vec<usize>,
    /// Index of the member with the lowest unit price, if any member is priced.
    pub best_value: Option<usize>,
    /// Second-best unit price minus best unit price; `None` when fewer than
    /// two members are priced.
    pub savings: Option<f64>,
}

/// Price per unit of size, or `None` when the size is non-positive or no
/// price is known.
#[must_use]
pub fn unit_price(lowest_price: Option<f64>, size: f64) -> Option<f64> {
    match lowest_price {
        Some(price) if size > 0.0 => Some(price / size),
        _ => None,
    }
}

/// Ranks members by unit price, ascending, `None` last.
#[must_use]
pub fn rank_by_unit_price(unit_prices: &[Option<f64>]) -> Ranking {
    let mut order: Vec<usize> = (0..unit_prices.len()).collect();
    order.sort_by(|&a, &b| cmp_nulls_last(unit_prices[a], unit_prices[b]));

    let mut priced = order
        .iter()
        .copied()
        .filter_map(|i| unit_prices[i].map(|v| (i, v)));
    let best = priced.next();
    let second = priced.next();

    let savings = match (best, second) {
        (Some((_, best_price)), Some((_, second_price))) => Some(second_price - best_price),
        _ => None,
    };

    Ranking {
        order,
        best_value: best.map(|(i, _)| i),
        savings,
    }
}

fn cmp_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_price_divides_by_size() {
        assert_eq!(unit_price(Some(5.0), 2.0), Some(2.5));
    }

    #[test]
    fn unit_price_none_without_price() {
        assert_eq!(unit_price(None, 2.0), None);
    }

    #[test]
    fn unit_price_none_for_zero_size() {
        assert_eq!(unit_price(Some(5.0), 0.0), None);
    }

    #[test]
    fn ranking_sorts_ascending_nulls_last() {
        let ranking = rank_by_unit_price(&[None, Some(2.5), Some(1.0)]);
        assert_eq!(ranking.order, vec![2, 1, 0]);
    }

    #[test]
    fn ranking_identifies_best_value_and_savings() {
        let ranking = rank_by_unit_price(&[None, Some(2.5), Some(1.0)]);
        assert_eq!(ranking.best_value, Some(2));
        assert_eq!(ranking.savings, Some(1.5));
    }

    #[test]
    fn ranking_single_priced_member_has_no_savings() {
        let ranking = rank_by_unit_price(&[Some(3.0), None]);
        assert_eq!(ranking.best_value, Some(0));
        assert_eq!(ranking.savings, None);
    }

    #[test]
    fn ranking_empty_input() {
        let ranking = rank_by_unit_price(&[]);
        assert!(ranking.order.is_empty());
        assert_eq!(ranking.best_value, None);
        assert_eq!(ranking.savings, None);
    }

    #[test]
    fn ranking_all_unpriced() {
        let ranking = rank_by_unit_price(&[None, None]);
        assert_eq!(ranking.order, vec![0, 1]);
        assert_eq!(ranking.best_value, None);
        assert_eq!(ranking.savings, None);
    }

    #[test]
    fn ranking_ties_keep_input_order() {
        let ranking = rank_by_unit_price(&[Some(1.0), Some(1.0), Some(0.5)]);
        assert_eq!(ranking.order, vec![2, 0, 1]);
        assert_eq!(ranking.best_value, Some(2));
        assert_eq!(ranking.savings, Some(0.5));
    }
}
