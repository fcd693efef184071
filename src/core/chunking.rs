//! Batch splitting by item count and by content size

/// Default maximum number of strings per request
pub const DEFAULT_MAX_ITEMS: usize = 128;

/// Default maximum total byte length of the strings in one request
pub const DEFAULT_MAX_BYTES: usize = 102_400;

/// Split `items` into consecutive groups of at most `sub_size` elements.
///
/// A `sub_size` below 1 is treated as 1. An empty input yields no groups.
pub fn split_list<T>(items: &[T], sub_size: usize) -> Vec<&[T]> {
    items.chunks(sub_size.max(1)).collect()
}

/// Split `items` so that each group's concatenated byte length is at most `content_size`.
///
/// Groups that are too large are halved at `ceil(len / 2)` and each half is split
/// again. A group holding a single string is returned as-is even when that string
/// alone exceeds the limit. A `content_size` below 1 is treated as 1.
pub fn split_list_by_content_size<S: AsRef<str>>(items: &[S], content_size: usize) -> Vec<&[S]> {
    let mut groups = Vec::new();
    split_into(items, content_size.max(1), &mut groups);
    groups
}

fn split_into<'a, S: AsRef<str>>(items: &'a [S], content_size: usize, groups: &mut Vec<&'a [S]>) {
    if items.len() <= 1 || content_len(items) <= content_size {
        groups.push(items);
        return;
    }

    let mid = items.len().div_ceil(2);
    let (head, tail) = items.split_at(mid);
    split_into(head, content_size, groups);
    split_into(tail, content_size, groups);
}

/// Total UTF-8 byte length of all strings
pub fn content_len<S: AsRef<str>>(items: &[S]) -> usize {
    items.iter().map(|s| s.as_ref().len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(lens: &[usize]) -> Vec<String> {
        lens.iter()
            .enumerate()
            .map(|(i, &len)| {
                let c = char::from(b'a' + (i % 26) as u8);
                std::iter::repeat(c).take(len).collect()
            })
            .collect()
    }

    #[test]
    fn test_split_list_groups_by_count() {
        let items: Vec<u32> = (0..10).collect();
        let groups = split_list(&items, 4);

        assert_eq!(groups, vec![&[0, 1, 2, 3][..], &[4, 5, 6, 7][..], &[8, 9][..]]);
    }

    #[test]
    fn test_split_list_covers_input_for_every_limit() {
        let items: Vec<u32> = (0..37).collect();

        for limit in 1..=40 {
            let groups = split_list(&items, limit);
            assert!(groups.iter().all(|g| g.len() <= limit && !g.is_empty()));
            assert_eq!(groups.concat(), items, "limit {}", limit);
        }
    }

    #[test]
    fn test_split_list_clamps_zero_limit() {
        let items = ["a", "b", "c"];
        let groups = split_list(&items, 0);

        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.len() == 1));
    }

    #[test]
    fn test_split_list_empty_input() {
        let items: Vec<String> = Vec::new();
        assert!(split_list(&items, 128).is_empty());
    }

    #[test]
    fn test_content_size_conforming_input_is_one_group() {
        let items = strings(&[10, 20, 30]);
        let groups = split_list_by_content_size(&items, 60);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0], &items[..]);
    }

    #[test]
    fn test_content_size_halves_at_ceiling_midpoint() {
        // 5 items of 10 bytes, limit 25: [3 | 2], then the 3 splits into [2 | 1]
        let items = strings(&[10, 10, 10, 10, 10]);
        let groups = split_list_by_content_size(&items, 25);

        let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(sizes, vec![2, 1, 2]);
    }

    #[test]
    fn test_content_size_oversized_single_item_is_kept() {
        let items = strings(&[5, 500, 5]);
        let groups = split_list_by_content_size(&items, 100);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[1].len(), 1);
        assert_eq!(content_len(groups[1]), 500);
    }

    #[test]
    fn test_content_size_groups_respect_limit_and_order() {
        let items = strings(&[3, 41, 7, 19, 88, 2, 2, 60, 15, 33, 1, 70, 9]);

        for limit in [0, 1, 10, 50, 100, 250, 10_000] {
            let groups = split_list_by_content_size(&items, limit);
            for &group in &groups {
                assert!(group.len() == 1 || content_len(group) <= limit.max(1));
            }
            assert_eq!(groups.concat(), items, "limit {}", limit);
        }
    }

    #[test]
    fn test_content_size_counts_bytes_not_chars() {
        // "你好" is 6 bytes in UTF-8
        let items = vec!["你好".to_string(), "你好".to_string()];

        assert_eq!(split_list_by_content_size(&items, 12).len(), 1);
        assert_eq!(split_list_by_content_size(&items, 11).len(), 2);
    }

    #[test]
    fn test_content_size_empty_input() {
        let items: Vec<String> = Vec::new();
        let groups = split_list_by_content_size(&items, 10);

        assert_eq!(groups.len(), 1);
        assert!(groups[0].is_empty());
    }
}
