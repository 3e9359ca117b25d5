//! Output filename convention.
//!
//! Chapter images are zero-padded to two digits so they sort correctly
//! in file listings; tagged assets use the tag verbatim.

use crate::id::ImageId;

/// Compute the output filename for an illustration.
///
/// # Examples
///
/// ```
/// use bookplate_core::id::ImageId;
/// use bookplate_core::naming::output_filename;
///
/// assert_eq!(output_filename(&ImageId::Chapter(7)), "chapter-07.jpg");
/// assert_eq!(output_filename(&ImageId::Tag("og".into())), "og.jpg");
/// ```
pub fn output_filename(id: &ImageId) -> String {
    match id {
        ImageId::Chapter(n) => format!("chapter-{n:02}.jpg"),
        ImageId::Tag(tag) => format!("{tag}.jpg"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_digit_chapter_is_zero_padded() {
        assert_eq!(output_filename(&ImageId::Chapter(7)), "chapter-07.jpg");
    }

    #[test]
    fn double_digit_chapter_unpadded() {
        assert_eq!(output_filename(&ImageId::Chapter(42)), "chapter-42.jpg");
    }

    #[test]
    fn three_digit_chapter_keeps_all_digits() {
        assert_eq!(output_filename(&ImageId::Chapter(105)), "chapter-105.jpg");
    }

    #[test]
    fn tag_used_verbatim() {
        assert_eq!(output_filename(&ImageId::Tag("og".into())), "og.jpg");
        assert_eq!(output_filename(&ImageId::Tag("hero".into())), "hero.jpg");
    }
}
