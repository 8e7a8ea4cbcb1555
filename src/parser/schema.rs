//! Typed view of an Elasticsearch Profile API document.
//!
//! Only the parts of the document the aggregator reads are modelled.
//! Every field carries its fallback value, so a record built from a
//! sparse document is always complete.

use crate::utils::config::{
    NO_DESCRIPTION, UNKNOWN_CHILD_TYPE, UNKNOWN_INDEX, UNKNOWN_QUERY_TYPE, UNKNOWN_SHARD,
};

/// Root of a profile document (`profile.shards`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDocument {
    /// Shards in document order
    pub shards: Vec<ShardRecord>,
}

/// Profiling block of a single shard
#[derive(Debug, Clone, PartialEq)]
pub struct ShardRecord {
    /// Index name
    pub index: String,

    /// Shard identifier, rendered as text
    pub shard_id: String,

    /// Search phases executed on this shard
    pub searches: Vec<SearchRecord>,

    /// Fetch phase timing
    pub fetch: FetchRecord,
}

impl Default for ShardRecord {
    fn default() -> Self {
        Self {
            index: UNKNOWN_INDEX.to_string(),
            shard_id: UNKNOWN_SHARD.to_string(),
            searches: Vec::new(),
            fetch: FetchRecord::default(),
        }
    }
}

/// One entry of a shard's `searches` list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRecord {
    /// Top-level query nodes
    pub query: Vec<QueryNode>,
}

/// Fetch phase block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchRecord {
    pub time_in_nanos: u64,
}

/// A node of the query execution tree
#[derive(Debug, Clone, PartialEq)]
pub struct QueryNode {
    /// Lucene query class, e.g. `TermQuery`
    pub query_type: String,

    /// Free-text description, usually `field:value`
    pub description: String,

    /// Self-reported elapsed time
    pub time_in_nanos: u64,

    /// Direct children. Grandchildren are never read.
    pub children: Vec<QueryNode>,
}

impl QueryNode {
    /// Empty top-level query node
    pub fn query() -> Self {
        Self::with_type(UNKNOWN_QUERY_TYPE)
    }

    /// Empty child node
    pub fn child() -> Self {
        Self::with_type(UNKNOWN_CHILD_TYPE)
    }

    fn with_type(query_type: &str) -> Self {
        Self {
            query_type: query_type.to_string(),
            description: NO_DESCRIPTION.to_string(),
            time_in_nanos: 0,
            children: Vec::new(),
        }
    }
}

/// Element counts of a parsed document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    pub shards: usize,
    pub searches: usize,
    pub queries: usize,
    pub children: usize,
}

impl ProfileDocument {
    /// Count shards, searches, top-level queries and direct children
    pub fn stats(&self) -> DocumentStats {
        let mut stats = DocumentStats {
            shards: self.shards.len(),
            ..Default::default()
        };

        for shard in &self.shards {
            stats.searches += shard.searches.len();
            for search in &shard.searches {
                stats.queries += search.query.len();
                stats.children += search.query.iter().map(|q| q.children.len()).sum::<usize>();
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_sentinels() {
        let shard = ShardRecord::default();
        assert_eq!(shard.index, "Unknown Index");
        assert_eq!(shard.shard_id, "Unknown Shard");
        assert_eq!(shard.fetch.time_in_nanos, 0);

        assert_eq!(QueryNode::query().query_type, "Unknown Query Type");
        assert_eq!(QueryNode::child().query_type, "Unknown Type");
        assert_eq!(QueryNode::child().description, "No Description");
    }

    #[test]
    fn test_stats_counts_one_level_of_children() {
        let mut query = QueryNode::query();
        query.children = vec![QueryNode::child(), QueryNode::child()];

        let doc = ProfileDocument {
            shards: vec![
                ShardRecord {
                    searches: vec![SearchRecord {
                        query: vec![query, QueryNode::query()],
                    }],
                    ..Default::default()
                },
                ShardRecord::default(),
            ],
        };

        let stats = doc.stats();
        assert_eq!(stats.shards, 2);
        assert_eq!(stats.searches, 1);
        assert_eq!(stats.queries, 2);
        assert_eq!(stats.children, 2);
    }
}
