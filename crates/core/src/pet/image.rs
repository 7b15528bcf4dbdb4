use super::Pet;

/// Object key of a pet's image in the images bucket.
///
/// ```
/// use petadoptions_core::pet::image_key;
///
/// assert_eq!(image_key("bunny", "bunny1"), "bunnies/bunny1.jpg");
/// assert_eq!(image_key("kitten", "kitten4"), "kitten/kitten4.jpg");
/// ```
pub fn image_key(pettype: &str, image: &str) -> String {
    let folder = match pettype {
        "bunny" => "bunnies",
        "puppy" => "puppies",
        _ => "kitten",
    };
    format!("{folder}/{image}.jpg")
}

/// Image key for a stored pet.
pub fn pet_image_key(pet: &Pet) -> String {
    image_key(&pet.pettype, &pet.image)
}

/// Public URL of an image served through a CDN.
pub fn cdn_image_url(cdn_base: &str, key: &str) -> String {
    format!("{}/{}", cdn_base.trim_end_matches('/'), key)
}
