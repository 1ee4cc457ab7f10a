//! Key-level comparison of a record as read against the record as re-encoded.

use std::fmt;

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Present in the input, absent from the output.
    Dropped,
    /// Absent from the input, present in the output.
    Added,
    Changed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub path: String,
    pub kind: ChangeKind,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            ChangeKind::Dropped => "dropped",
            ChangeKind::Added => "added",
            ChangeKind::Changed => "changed",
        };
        write!(f, "{:<8}{}", label, self.path)
    }
}

/// Every path at which `after` differs from `before`, depth first.
pub fn changes(before: &Value, after: &Value) -> Vec<Change> {
    let mut out = Vec::new();
    walk("", before, after, &mut out);
    out
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn walk(path: &str, before: &Value, after: &Value, out: &mut Vec<Change>) {
    match (before, after) {
        (Value::Object(a), Value::Object(b)) => {
            for (key, value) in a {
                let child = join(path, key);
                match b.get(key) {
                    Some(other) => walk(&child, value, other, out),
                    None => out.push(Change {
                        path: child,
                        kind: ChangeKind::Dropped,
                    }),
                }
            }
            for key in b.keys().filter(|k| !a.contains_key(*k)) {
                out.push(Change {
                    path: join(path, key),
                    kind: ChangeKind::Added,
                });
            }
        }
        (Value::Array(a), Value::Array(b)) if a.len() == b.len() => {
            for (i, (x, y)) in a.iter().zip(b).enumerate() {
                walk(&format!("{}[{}]", path, i), x, y, out);
            }
        }
        _ if before != after => out.push(Change {
            path: path.to_string(),
            kind: ChangeKind::Changed,
        }),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn identical_values_have_no_changes() {
        let v = json!({"ruleType": "http", "target": {"headers": [{"name": "a"}]}});
        assert!(changes(&v, &v).is_empty());
    }

    #[test]
    fn reports_nested_paths() {
        let before = json!({
            "target": {"authentication": {"authenticationMode": "assumeRole", "externalId": "x"}},
            "source": {"channelFilter": ""}
        });
        let after = json!({
            "target": {"authentication": {"authenticationMode": "assumeRole"}, "enveloped": false},
            "source": {}
        });
        let found = changes(&before, &after);
        assert_eq!(
            found,
            vec![
                Change {
                    path: "source.channelFilter".into(),
                    kind: ChangeKind::Dropped
                },
                Change {
                    path: "target.authentication.externalId".into(),
                    kind: ChangeKind::Dropped
                },
                Change {
                    path: "target.enveloped".into(),
                    kind: ChangeKind::Added
                },
            ]
        );
    }

    #[test]
    fn array_elements_are_indexed() {
        let found = changes(&json!({"brokers": ["a", "b"]}), &json!({"brokers": ["a", "c"]}));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "brokers[1]");
        assert_eq!(found[0].to_string(), "changed brokers[1]");
    }
}
