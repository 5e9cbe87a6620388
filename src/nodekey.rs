/// [crate::nodekey] contains [NodeKey], an explicit position in the content tree, and
/// [RouteParams], the four optional identifier strings the routing layer hands us. The
/// query-string form (`/?id=1&chapter=13&set=25&p=1`) is the site's URL scheme.
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};
use url::{form_urlencoded, Url};

use crate::error::ContentError;

pub const BOOK_PARAM: &str = "id";
pub const CHAPTER_PARAM: &str = "chapter";
pub const SET_PARAM: &str = "set";
pub const PROBLEM_PARAM: &str = "p";

/// Parse an identifier string into an id. Only the canonical decimal rendering of an id matches
/// it: `"7"` does, `"07"`, `"+7"` and `" 7"` do not.
pub fn parse_id(s: &str) -> Option<u32> {
    s.parse::<u32>().ok().filter(|id| id.to_string() == s)
}

/// The current position as supplied by the routing layer. Every field may be missing or
/// garbage; resolution decides what, if anything, it refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteParams {
    pub book: Option<String>,
    pub chapter: Option<String>,
    pub set: Option<String>,
    pub problem: Option<String>,
}

impl RouteParams {
    pub fn new(
        book: Option<&str>,
        chapter: Option<&str>,
        set: Option<&str>,
        problem: Option<&str>,
    ) -> RouteParams {
        RouteParams {
            book: book.map(str::to_string),
            chapter: chapter.map(str::to_string),
            set: set.map(str::to_string),
            problem: problem.map(str::to_string),
        }
    }

    /// Read the route parameters out of a query string. Accepts a bare query (`id=1&set=2`), a
    /// leading `?`, or a path-and-query (`/?id=1`). Empty values count as absent, unknown keys
    /// are ignored, and the first occurrence of a repeated key wins.
    pub fn from_query(query: &str) -> RouteParams {
        let query = match query.find('?') {
            Some(idx) => &query[idx + 1..],
            None => query,
        };
        let query = query.split('#').next().unwrap_or_default();
        let mut params = RouteParams::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            let slot = match &*key {
                BOOK_PARAM => &mut params.book,
                CHAPTER_PARAM => &mut params.chapter,
                SET_PARAM => &mut params.set,
                PROBLEM_PARAM => &mut params.problem,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    /// Read the route parameters out of an absolute URL.
    pub fn from_url(url: &str) -> Result<RouteParams, ContentError> {
        let parsed = Url::parse(url)?;
        Ok(RouteParams::from_query(parsed.query().unwrap_or_default()))
    }

    pub fn is_empty(&self) -> bool {
        self.book.is_none() && self.chapter.is_none() && self.set.is_none() && self.problem.is_none()
    }

    /// Render as a query string (without the leading `?`), omitting absent parameters.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in [
            (BOOK_PARAM, &self.book),
            (CHAPTER_PARAM, &self.chapter),
            (SET_PARAM, &self.set),
            (PROBLEM_PARAM, &self.problem),
        ] {
            if let Some(value) = value {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

/// A well-formed position in the content tree, identified by ids.
///
/// A key says nothing about whether the position exists; see
/// [crate::contentbase::ContentBase::resolve_key].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKey {
    Textbook {
        book: u32,
    },
    Chapter {
        book: u32,
        chapter: u32,
    },
    ProblemSet {
        book: u32,
        chapter: u32,
        set: u32,
    },
    Problem {
        book: u32,
        chapter: u32,
        set: u32,
        problem: u32,
    },
}

impl NodeKey {
    pub fn book(&self) -> u32 {
        match self {
            NodeKey::Textbook { book }
            | NodeKey::Chapter { book, .. }
            | NodeKey::ProblemSet { book, .. }
            | NodeKey::Problem { book, .. } => *book,
        }
    }

    /// Number of tree levels the key names: 1 for a textbook through 4 for a problem.
    pub fn depth(&self) -> usize {
        match self {
            NodeKey::Textbook { .. } => 1,
            NodeKey::Chapter { .. } => 2,
            NodeKey::ProblemSet { .. } => 3,
            NodeKey::Problem { .. } => 4,
        }
    }

    pub fn parent(&self) -> Option<NodeKey> {
        match *self {
            NodeKey::Textbook { .. } => None,
            NodeKey::Chapter { book, .. } => Some(NodeKey::Textbook { book }),
            NodeKey::ProblemSet { book, chapter, .. } => Some(NodeKey::Chapter { book, chapter }),
            NodeKey::Problem {
                book, chapter, set, ..
            } => Some(NodeKey::ProblemSet { book, chapter, set }),
        }
    }

    /// The longest well-formed key described by `params`: parsing stops at the first level that
    /// is absent or not a canonical id. Returns `None` when there is no usable book id.
    pub fn from_params(params: &RouteParams) -> Option<NodeKey> {
        let id = |s: &Option<String>| s.as_deref().and_then(parse_id);
        let book = id(&params.book)?;
        let Some(chapter) = id(&params.chapter) else {
            return Some(NodeKey::Textbook { book });
        };
        let Some(set) = id(&params.set) else {
            return Some(NodeKey::Chapter { book, chapter });
        };
        let Some(problem) = id(&params.problem) else {
            return Some(NodeKey::ProblemSet { book, chapter, set });
        };
        Some(NodeKey::Problem {
            book,
            chapter,
            set,
            problem,
        })
    }

    /// Site-relative link to this position.
    pub fn href(&self) -> String {
        format!("/?{}", RouteParams::from(self).to_query())
    }
}

impl From<&NodeKey> for RouteParams {
    fn from(key: &NodeKey) -> RouteParams {
        let s = |id: u32| Some(id.to_string());
        match *key {
            NodeKey::Textbook { book } => RouteParams {
                book: s(book),
                ..Default::default()
            },
            NodeKey::Chapter { book, chapter } => RouteParams {
                book: s(book),
                chapter: s(chapter),
                ..Default::default()
            },
            NodeKey::ProblemSet { book, chapter, set } => RouteParams {
                book: s(book),
                chapter: s(chapter),
                set: s(set),
                problem: None,
            },
            NodeKey::Problem {
                book,
                chapter,
                set,
                problem,
            } => RouteParams {
                book: s(book),
                chapter: s(chapter),
                set: s(set),
                problem: s(problem),
            },
        }
    }
}

impl Display for NodeKey {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.href())
    }
}

impl FromStr for NodeKey {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let params = RouteParams::from_query(s);
        NodeKey::from_params(&params).ok_or_else(|| {
            ContentError::Command(format!(
                "'{s}' does not name a textbook (expected e.g. /?{BOOK_PARAM}=1)"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_is_canonical() {
        assert_eq!(parse_id("7"), Some(7));
        assert_eq!(parse_id("0"), Some(0));
        assert_eq!(parse_id("07"), None);
        assert_eq!(parse_id("+7"), None);
        assert_eq!(parse_id(" 7"), None);
        assert_eq!(parse_id("seven"), None);
        assert_eq!(parse_id("-1"), None);
    }

    #[test]
    fn route_params_from_query_variants() {
        let expected = RouteParams::new(Some("1"), Some("13"), Some("25"), Some("4"));
        assert_eq!(
            RouteParams::from_query("/?id=1&chapter=13&set=25&p=4"),
            expected
        );
        assert_eq!(RouteParams::from_query("?id=1&chapter=13&set=25&p=4"), expected);
        assert_eq!(RouteParams::from_query("id=1&chapter=13&set=25&p=4"), expected);
        assert_eq!(
            RouteParams::from_query("p=4&set=25&theme=dark&chapter=13&id=1#top"),
            expected
        );
    }

    #[test]
    fn empty_and_repeated_values() {
        let params = RouteParams::from_query("?id=&chapter=2&chapter=3");
        assert_eq!(params.book, None);
        assert_eq!(params.chapter.as_deref(), Some("2"));
        assert!(RouteParams::from_query("").is_empty());
    }

    #[test]
    fn route_params_from_url() {
        let params = RouteParams::from_url("https://example.com/?id=1&chapter=13").unwrap();
        assert_eq!(params, RouteParams::new(Some("1"), Some("13"), None, None));
        assert!(RouteParams::from_url("not a url").is_err());
    }

    #[test]
    fn node_key_stops_at_first_unusable_level() {
        let params = RouteParams::new(Some("1"), Some("x"), Some("25"), Some("4"));
        assert_eq!(
            NodeKey::from_params(&params),
            Some(NodeKey::Textbook { book: 1 })
        );
        let params = RouteParams::new(None, Some("13"), Some("25"), Some("4"));
        assert_eq!(NodeKey::from_params(&params), None);
    }

    #[test]
    fn href_round_trips() {
        let key = NodeKey::Problem {
            book: 1,
            chapter: 13,
            set: 25,
            problem: 4,
        };
        assert_eq!(key.href(), "/?id=1&chapter=13&set=25&p=4");
        assert_eq!(key.to_string().parse::<NodeKey>().unwrap(), key);
        assert_eq!(
            key.parent(),
            Some(NodeKey::ProblemSet {
                book: 1,
                chapter: 13,
                set: 25
            })
        );
        assert_eq!(key.depth(), 4);
        assert!("/?chapter=2".parse::<NodeKey>().is_err());
    }
}
