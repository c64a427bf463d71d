//! Route table and path matching.
//!
//! Records are tried in declaration order and the first match wins, so records with
//! static segments must come before records that would capture the same path with a
//! parameter (`/weeks/current` before `/weeks/:id`, both before `/:year/:week_nbr`).

use std::collections::BTreeMap;

use serde::Serialize;

pub mod names {
    pub const LOGIN: &str = "Login";
    pub const NO_WEEK: &str = "NoWeek";
    pub const DISHES: &str = "dishes";
    pub const CURRENT_WEEK: &str = "CurrentWeek";
    pub const WEEK_VIEW: &str = "WeekView";
    pub const WEEK_BY_YEAR_AND_NUMBER: &str = "WeekByYearAndNumber";
}

pub mod paths {
    pub const LOGIN: &str = "/login";
    pub const NO_WEEK: &str = "/no-week";
    pub const DISHES: &str = "/dishes";
    pub const CURRENT_WEEK: &str = "/weeks/current";
    pub const WEEK_VIEW: &str = "/weeks/:id";
    pub const WEEK_BY_YEAR_AND_NUMBER: &str = "/:year/:week_nbr";

    pub fn week(id: crate::WeekId) -> String {
        format!("/weeks/{id}")
    }
}

/// What navigating to a record does before a view can be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// Concrete route rendered by a view.
    View,
    /// Symbolic: the week containing today.
    CurrentWeek,
    /// Symbolic: the week named by `:year` and `:week_nbr`.
    WeekByYearAndNumber,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub name: &'static str,
    pub path: String,
    pub aliases: Vec<String>,
    pub kind: RouteKind,
    pub requires_auth: bool,
    pub children: Vec<RouteRecord>,
}

impl RouteRecord {
    pub fn view(name: &'static str, path: impl Into<String>) -> Self {
        Self {
            name,
            path: path.into(),
            aliases: Vec::new(),
            kind: RouteKind::View,
            requires_auth: false,
            children: Vec::new(),
        }
    }

    pub fn symbolic(name: &'static str, path: impl Into<String>, kind: RouteKind) -> Self {
        Self {
            kind,
            ..Self::view(name, path)
        }
    }

    pub fn alias(mut self, path: impl Into<String>) -> Self {
        self.aliases.push(path.into());
        self
    }

    pub fn requires_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// Nested record; a relative child path is appended to this record's path.
    pub fn child(mut self, record: RouteRecord) -> Self {
        self.children.push(record);
        self
    }

    fn patterns(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.path.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Result of matching a path against the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedRoute {
    pub path: String,
    pub name: &'static str,
    pub kind: RouteKind,
    pub params: BTreeMap<String, String>,
    /// Names of the matched records, outermost ancestor first.
    pub matched: Vec<&'static str>,
    /// Set when any record in `matched` requires authentication.
    pub requires_auth: bool,
}

impl MatchedRoute {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    records: Vec<RouteRecord>,
}

impl RouteTable {
    pub fn new(records: Vec<RouteRecord>) -> Self {
        Self { records }
    }

    pub fn resolve(&self, path: &str) -> Option<MatchedRoute> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = split(path).collect();

        self.records.iter().find_map(|record| {
            let chain = match_record(record, "", &segments)?;
            let leaf = chain.last()?;

            Some(MatchedRoute {
                path: path.to_owned(),
                name: leaf.record.name,
                kind: leaf.record.kind,
                params: leaf.params.clone(),
                matched: chain.iter().map(|m| m.record.name).collect(),
                requires_auth: chain.iter().any(|m| m.record.requires_auth),
            })
        })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(vec![
            RouteRecord::view(names::LOGIN, paths::LOGIN),
            RouteRecord::view(names::NO_WEEK, paths::NO_WEEK),
            RouteRecord::view(names::DISHES, paths::DISHES).requires_auth(),
            RouteRecord::symbolic(
                names::CURRENT_WEEK,
                paths::CURRENT_WEEK,
                RouteKind::CurrentWeek,
            )
            .alias("/"),
            RouteRecord::view(names::WEEK_VIEW, paths::WEEK_VIEW).requires_auth(),
            RouteRecord::symbolic(
                names::WEEK_BY_YEAR_AND_NUMBER,
                paths::WEEK_BY_YEAR_AND_NUMBER,
                RouteKind::WeekByYearAndNumber,
            ),
        ])
    }
}

struct Matched<'a> {
    record: &'a RouteRecord,
    params: BTreeMap<String, String>,
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn join(parent: &str, child: &str) -> String {
    if child.starts_with('/') {
        child.to_owned()
    } else {
        format!("{}/{}", parent.trim_end_matches('/'), child)
    }
}

fn match_record<'a>(
    record: &'a RouteRecord,
    parent: &str,
    segments: &[&str],
) -> Option<Vec<Matched<'a>>> {
    for pattern in record.patterns() {
        let full = join(parent, pattern);

        for child in &record.children {
            if let Some(mut chain) = match_record(child, &full, segments) {
                let params = chain.first().map(|m| m.params.clone()).unwrap_or_default();
                chain.insert(0, Matched { record, params });
                return Some(chain);
            }
        }

        if let Some(params) = match_segments(&full, segments) {
            return Some(vec![Matched { record, params }]);
        }
    }

    None
}

fn match_segments(pattern: &str, segments: &[&str]) -> Option<BTreeMap<String, String>> {
    let expected: Vec<&str> = split(pattern).collect();
    if expected.len() != segments.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    for (expected, actual) in expected.iter().zip(segments) {
        match expected.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_owned(), (*actual).to_owned());
            }
            None if expected == actual => {}
            None => return None,
        }
    }

    Some(params)
}
