//! Grouping of parsed commits by type

use crate::types::{CommitMetadata, GroupedMetadata};

/// Partition metadata by commit type.
///
/// Buckets appear in the order their type is first seen and keep the input
/// order of their items; nothing is dropped or synthesized.
pub fn group(metadata: impl IntoIterator<Item = CommitMetadata>) -> GroupedMetadata {
    let mut grouped = GroupedMetadata::new();
    for item in metadata {
        grouped.push(item);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConventionalType;

    fn meta(commit_type: ConventionalType, description: &str) -> CommitMetadata {
        CommitMetadata::new(commit_type, description)
    }

    #[test]
    fn test_group_empty() {
        let grouped = group(Vec::new());
        assert!(grouped.is_empty());
        assert_eq!(grouped.total(), 0);
    }

    #[test]
    fn test_group_feat_and_fix() {
        let grouped = group(vec![
            meta(ConventionalType::Feat, "add picker"),
            meta(ConventionalType::Fix, "repair picker"),
        ]);

        assert_eq!(
            grouped.types(),
            vec![ConventionalType::Feat, ConventionalType::Fix]
        );
        assert_eq!(
            grouped.get(ConventionalType::Feat).unwrap(),
            &[meta(ConventionalType::Feat, "add picker")]
        );
        assert_eq!(
            grouped.get(ConventionalType::Fix).unwrap(),
            &[meta(ConventionalType::Fix, "repair picker")]
        );
    }

    #[test]
    fn test_group_keeps_order_and_never_drops() {
        let input = vec![
            meta(ConventionalType::Docs, "d1"),
            meta(ConventionalType::Feat, "f1"),
            meta(ConventionalType::Docs, "d2"),
            meta(ConventionalType::Ci, "c1"),
            meta(ConventionalType::Feat, "f2"),
            meta(ConventionalType::Docs, "d3"),
        ];
        let grouped = group(input.clone());

        assert_eq!(grouped.total(), input.len());
        assert_eq!(
            grouped.types(),
            vec![
                ConventionalType::Docs,
                ConventionalType::Feat,
                ConventionalType::Ci
            ]
        );

        let docs: Vec<&str> = grouped
            .get(ConventionalType::Docs)
            .unwrap()
            .iter()
            .map(|m| m.description.as_str())
            .collect();
        assert_eq!(docs, vec!["d1", "d2", "d3"]);
    }

    #[test]
    fn test_every_bucket_holds_only_its_type() {
        let input: Vec<CommitMetadata> = ConventionalType::ALL
            .iter()
            .rev()
            .chain(ConventionalType::ALL.iter())
            .map(|t| meta(*t, t.as_str()))
            .collect();
        let grouped = group(input);

        assert_eq!(grouped.len(), ConventionalType::ALL.len());
        assert_eq!(grouped.total(), ConventionalType::ALL.len() * 2);
        for (commit_type, items) in grouped.iter() {
            assert!(items.iter().all(|m| m.commit_type == commit_type));
        }
    }
}
