//! Keyword-frequency tallies over tokenized text
//!
//! Counting is an explicit state object, not module-level accumulation:
//! callers own a [`KeywordCounter`], feed it text, read the tallies, and
//! reset it between runs. Morphological analysis stays behind the
//! [`Tokenizer`] seam; Korean noun extraction is a collaborator, not a
//! concern of this crate.

/// Token source for counting: `nouns` reduces free text to countable words
pub trait Tokenizer {
    fn nouns(&self, text: &str) -> Vec<String>;
}

/// Fallback tokenizer splitting on whitespace; adequate for tests and for
/// text that is already space-delimited.
#[derive(Debug, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn nouns(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

/// Running keyword tallies across three fixed categories: items, colours,
/// and materials. Tallies are positional, so a keyword declared in more
/// than one category keeps a slot (and a tally) per declaration.
#[derive(Debug)]
pub struct KeywordCounter {
    counts: Vec<(String, u64)>,
    colour_index: usize,
    material_index: usize,
}

impl KeywordCounter {
    pub fn new(items: &[&str], colours: &[&str], materials: &[&str]) -> Self {
        let colour_index = items.len();
        let material_index = colour_index + colours.len();

        let counts = items
            .iter()
            .chain(colours.iter())
            .chain(materials.iter())
            .map(|k| (k.to_string(), 0))
            .collect();

        Self {
            counts,
            colour_index,
            material_index,
        }
    }

    /// Tally keyword hits in `text`. A keyword counts once per token that
    /// contains it, so "니트조끼" hits both "니트" and "조끼".
    pub fn count(&mut self, text: &str, tokenizer: &dyn Tokenizer) {
        let words = tokenizer.nouns(text);
        for (keyword, tally) in self.counts.iter_mut() {
            *tally += words.iter().filter(|w| w.contains(keyword.as_str())).count() as u64;
        }
    }

    /// Current tallies as (items, colours, materials) views, each in
    /// declaration order.
    pub fn counts(&self) -> (Vec<(&str, u64)>, Vec<(&str, u64)>, Vec<(&str, u64)>) {
        let all: Vec<(&str, u64)> = self.counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        let (items, rest) = all.split_at(self.colour_index);
        let (colours, materials) = rest.split_at(self.material_index - self.colour_index);
        (items.to_vec(), colours.to_vec(), materials.to_vec())
    }

    /// Tally for one keyword, if it was declared; the first declaration
    /// wins when a keyword appears in more than one category.
    pub fn get(&self, keyword: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, v)| *v)
    }

    /// Zero every tally, keeping the keyword set
    pub fn reset(&mut self) {
        for (_, tally) in self.counts.iter_mut() {
            *tally = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> KeywordCounter {
        KeywordCounter::new(&["니트", "조끼"], &["검정"], &["울", "데님"])
    }

    #[test]
    fn test_counts_substring_hits_per_token() {
        let mut c = counter();
        c.count("검정 니트조끼 데님팬츠", &WhitespaceTokenizer);
        assert_eq!(c.get("니트"), Some(1));
        assert_eq!(c.get("조끼"), Some(1));
        assert_eq!(c.get("검정"), Some(1));
        assert_eq!(c.get("데님"), Some(1));
        assert_eq!(c.get("울"), Some(0));
    }

    #[test]
    fn test_counts_accumulate_across_calls() {
        let mut c = counter();
        c.count("니트", &WhitespaceTokenizer);
        c.count("니트 니트", &WhitespaceTokenizer);
        assert_eq!(c.get("니트"), Some(3));
    }

    #[test]
    fn test_category_views_in_declaration_order() {
        let mut c = counter();
        c.count("울 검정", &WhitespaceTokenizer);
        let (items, colours, materials) = c.counts();
        assert_eq!(items, vec![("니트", 0), ("조끼", 0)]);
        assert_eq!(colours, vec![("검정", 1)]);
        assert_eq!(materials, vec![("울", 1), ("데님", 0)]);
    }

    #[test]
    fn test_keyword_in_two_categories_keeps_both_slots() {
        let mut c = KeywordCounter::new(&["베이지", "니트"], &["베이지"], &[]);
        c.count("베이지 코트", &WhitespaceTokenizer);

        let (items, colours, materials) = c.counts();
        assert_eq!(items, vec![("베이지", 1), ("니트", 0)]);
        assert_eq!(colours, vec![("베이지", 1)]);
        assert!(materials.is_empty());
    }

    #[test]
    fn test_reset_zeroes_but_keeps_keywords() {
        let mut c = counter();
        c.count("니트", &WhitespaceTokenizer);
        c.reset();
        assert_eq!(c.get("니트"), Some(0));
        let (items, _, _) = c.counts();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_undeclared_keyword_is_none() {
        assert_eq!(counter().get("가죽"), None);
    }
}
