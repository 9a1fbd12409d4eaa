use std::{mem::swap, ops::Deref};

/// Edit-distance suggestions for tokens that match nothing.
pub struct Spell(Vec<usize>, Vec<usize>);

impl Spell {
    pub const fn new() -> Self {
        Self(Vec::new(), Vec::new())
    }

    /// Candidates closer than `maximum` edits, nearest first.
    pub fn suggest<T: Deref<Target = str>>(
        &mut self,
        word: &str,
        dictionary: impl IntoIterator<Item = T>,
        maximum: usize,
    ) -> Vec<T> {
        let dictionary = dictionary.into_iter();
        let mut results = Vec::with_capacity(dictionary.size_hint().0);
        for candidate in dictionary {
            let distance = self.distance(word, &candidate);
            if distance < maximum {
                results.push((candidate, distance));
            }
        }
        results.sort_by_key(|&(_, distance)| distance);
        results.into_iter().map(|(candidate, _)| candidate).collect()
    }

    /// Suggestion threshold for a token of the given length.
    #[inline]
    pub fn maximum(word: &str) -> usize {
        (word.chars().count() / 3).clamp(1, 3) + 1
    }

    fn distance(&mut self, left: &str, right: &str) -> usize {
        let left = left.chars().collect::<Vec<_>>();
        let right = right.chars().collect::<Vec<_>>();
        let (left, right) = if left.len() > right.len() {
            (right, left)
        } else {
            (left, right)
        };

        let Self(previous, current) = self;
        previous.clear();
        previous.extend(0..=left.len());
        current.clear();
        current.resize(left.len() + 1, 0);

        for i in 1..=right.len() {
            current[0] = i;
            for j in 1..=left.len() {
                let same = left[j - 1].to_lowercase().eq(right[i - 1].to_lowercase());
                let insert = current[j - 1] + 1;
                let delete = previous[j] + 1;
                let replace = previous[j - 1] + if same { 0 } else { 1 };
                current[j] = insert.min(delete).min(replace);
            }
            swap(previous, current);
        }

        previous[left.len()]
    }
}
