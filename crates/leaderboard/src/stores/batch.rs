//! Queued reads that execute as one atomic unit.

/// A single read queued in a [`Batch`].
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOp {
    Score(String),
    RankAscending(String),
    RankDescending(String),
    Cardinality,
}

/// Reply to one [`BatchOp`], in the same position as the op was queued.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchReply {
    Score(Option<f64>),
    Rank(Option<u64>),
    Count(u64),
}

/// Reads against one collection, executed with
/// [`RankingStore::execute`](super::RankingStore::execute) so that no write can
/// land between them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    ops: Vec<BatchOp>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(mut self, member: &str) -> Self {
        self.ops.push(BatchOp::Score(member.to_string()));
        self
    }

    pub fn rank_ascending(mut self, member: &str) -> Self {
        self.ops.push(BatchOp::RankAscending(member.to_string()));
        self
    }

    pub fn rank_descending(mut self, member: &str) -> Self {
        self.ops.push(BatchOp::RankDescending(member.to_string()));
        self
    }

    pub fn cardinality(mut self) -> Self {
        self.ops.push(BatchOp::Cardinality);
        self
    }

    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ops_keep_queue_order() {
        let batch = Batch::new().score("alice").rank_descending("alice").cardinality();

        assert_eq!(
            batch.ops(),
            &[
                BatchOp::Score("alice".to_string()),
                BatchOp::RankDescending("alice".to_string()),
                BatchOp::Cardinality,
            ]
        );
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn new_batch_is_empty() {
        assert!(Batch::new().is_empty());
    }
}
