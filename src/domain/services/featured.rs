use crate::domain::models::portfolio::PortfolioImage;

/// Restores the featured-image invariant: exactly one featured image when the
/// list is non-empty. The first already-featured image wins; if none is
/// featured, the first image in order becomes featured.
pub fn recompute_featured(mut images: Vec<PortfolioImage>) -> Vec<PortfolioImage> {
    let keep = images.iter().position(|img| img.is_featured).unwrap_or(0);
    for (idx, img) in images.iter_mut().enumerate() {
        img.is_featured = idx == keep;
    }
    images
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str, featured: bool) -> PortfolioImage {
        let mut img = PortfolioImage::new(url.to_string(), None);
        img.is_featured = featured;
        img
    }

    fn featured_urls(images: &[PortfolioImage]) -> Vec<&str> {
        images.iter().filter(|i| i.is_featured).map(|i| i.url.as_str()).collect()
    }

    #[test]
    fn empty_list_stays_empty() {
        assert!(recompute_featured(Vec::new()).is_empty());
    }

    #[test]
    fn first_upload_becomes_featured() {
        let images = recompute_featured(vec![image("/a.jpg", false), image("/b.jpg", false)]);
        assert_eq!(featured_urls(&images), vec!["/a.jpg"]);
    }

    #[test]
    fn existing_featured_image_is_kept_when_more_are_added() {
        let images = recompute_featured(vec![
            image("/a.jpg", false),
            image("/b.jpg", true),
            image("/c.jpg", false),
        ]);
        assert_eq!(featured_urls(&images), vec!["/b.jpg"]);
    }

    #[test]
    fn removing_the_featured_image_promotes_the_first_remaining() {
        let mut images = recompute_featured(vec![image("/a.jpg", true), image("/b.jpg", false), image("/c.jpg", false)]);
        images.remove(0);
        let images = recompute_featured(images);
        assert_eq!(featured_urls(&images), vec!["/b.jpg"]);
    }

    #[test]
    fn duplicate_featured_flags_collapse_to_one() {
        let images = recompute_featured(vec![image("/a.jpg", false), image("/b.jpg", true), image("/c.jpg", true)]);
        assert_eq!(featured_urls(&images), vec!["/b.jpg"]);
        assert_eq!(images.len(), 3);
    }
}
