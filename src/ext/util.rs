use std::borrow::Cow;

pub trait StrAdditions {
    fn pad_left_to(&self, len: usize) -> Cow<'_, str>;
}

impl StrAdditions for str {
    fn pad_left_to(&self, len: usize) -> Cow<'_, str> {
        let chars = self.chars().count();
        if chars < len {
            Cow::Owned(format!("{}{self}", " ".repeat(len - chars)))
        } else {
            Cow::Borrowed(self)
        }
    }
}

impl StrAdditions for String {
    fn pad_left_to(&self, len: usize) -> Cow<'_, str> {
        self.as_str().pad_left_to(len)
    }
}
