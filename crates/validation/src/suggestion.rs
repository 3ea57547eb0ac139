use std::fmt::Write;

fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1 = s1.chars().collect::<Vec<_>>();
    let s2 = s2.chars().collect::<Vec<_>>();
    let mut prev = (0..=s2.len()).collect::<Vec<_>>();
    let mut row = vec![0; s2.len() + 1];

    for (i, c1) in s1.iter().enumerate() {
        row[0] = i + 1;
        for (j, c2) in s2.iter().enumerate() {
            let substitution = prev[j] + usize::from(c1 != c2);
            row[j + 1] = substitution.min(prev[j + 1] + 1).min(row[j] + 1);
        }
        std::mem::swap(&mut prev, &mut row);
    }

    prev[s2.len()]
}

/// Builds a `Did you mean ...?` hint from the options close enough to `input`.
pub fn make_suggestion<I, A>(prefix: &str, options: I, input: &str) -> Option<String>
where
    I: IntoIterator<Item = A>,
    A: AsRef<str>,
{
    let threshold = input.chars().count() * 2 / 5 + 1;
    let input_lowercase = input.to_lowercase();
    let mut selected = options
        .into_iter()
        .filter_map(|option| {
            let option = option.as_ref();
            let distance = if option.to_lowercase() == input_lowercase {
                1
            } else {
                levenshtein_distance(input, option)
            };
            (distance <= threshold).then(|| (distance, option.to_string()))
        })
        .collect::<Vec<_>>();
    if selected.is_empty() {
        return None;
    }
    selected.sort();
    selected.dedup();
    selected.truncate(5);

    let mut suggestion = String::from(prefix);
    for (idx, (_, option)) in selected.iter().enumerate() {
        match idx {
            0 => {}
            _ if idx == selected.len() - 1 => suggestion.push_str(" or"),
            _ => suggestion.push(','),
        }
        let _ = write!(suggestion, " \"{}\"", option);
    }
    suggestion.push('?');
    Some(suggestion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("name", "name"), 0);
        assert_eq!(levenshtein_distance("nmae", "name"), 2);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn suggestions() {
        assert_eq!(
            make_suggestion(" Did you mean", ["name", "nickname", "barks"], "nme").as_deref(),
            Some(" Did you mean \"name\"?")
        );
        assert_eq!(
            make_suggestion(" Did you mean", ["barks", "bark", "barkVolume"], "brk").as_deref(),
            Some(" Did you mean \"bark\" or \"barks\"?")
        );
        assert_eq!(make_suggestion(" Did you mean", ["name"], "zzzzzz"), None);
    }
}
