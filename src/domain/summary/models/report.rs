use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::domain::activity::models::EnrichedActivity;
use crate::domain::user::models::user::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserReport {
    pub username: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    pub category: String,
    pub quantity: u64,
}

/// Aggregate sent to administrators. Built per report and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReport {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub users: Vec<UserReport>,
    pub categories: Vec<CategoryReport>,
    pub new_users: Vec<User>,
    /// Activities inside the window.
    pub quantity: u64,
    /// Activities ever recorded.
    pub total: u64,
}

impl SummaryReport {
    pub fn build(
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        activities: &[EnrichedActivity],
        new_users: Vec<User>,
        total: u64,
    ) -> Self {
        Self {
            from,
            to,
            users: users_total(activities),
            categories: category_total(activities),
            new_users,
            quantity: activities.len() as u64,
            total,
        }
    }
}

pub fn users_total(activities: &[EnrichedActivity]) -> Vec<UserReport> {
    tally(activities.iter().map(EnrichedActivity::username))
        .into_iter()
        .map(|(username, quantity)| UserReport { username, quantity })
        .collect()
}

pub fn category_total(activities: &[EnrichedActivity]) -> Vec<CategoryReport> {
    tally(activities.iter().map(EnrichedActivity::category))
        .into_iter()
        .map(|(category, quantity)| CategoryReport { category, quantity })
        .collect()
}

// Groups keep the order of their first occurrence; the sort is stable so
// equal counts stay in that order.
fn tally<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(String, u64)> {
    let mut positions: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(String, u64)> = Vec::new();

    for key in keys {
        match positions.get(key) {
            Some(&position) => groups[position].1 += 1,
            None => {
                positions.insert(key, groups.len());
                groups.push((key.to_string(), 1));
            }
        }
    }

    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups
}
