/// Uppercase the first character and lowercase everything after it.
pub(crate) fn capitalize(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + &c.as_str().to_lowercase(),
    }
}

pub(crate) fn starts_with_uppercase(s: &str) -> bool {
    s.chars().next().map_or(false, char::is_uppercase)
}

pub(crate) fn join_with_spaces<I>(mut iter: I) -> String
where
    I: Iterator + Clone,
    I::Item: AsRef<str>,
{
    let length: usize = iter
        .clone()
        .map(|item| item.as_ref().len() + 1)
        .sum::<usize>()
        .saturating_sub(1);
    let mut string = String::with_capacity(length);

    match iter.next() {
        Some(item) => string.push_str(item.as_ref()),
        None => return string,
    };

    for item in iter {
        string.push(' ');
        string.push_str(item.as_ref());
    }
    string
}
