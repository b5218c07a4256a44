/// Look up city and state from a full 5-digit US zip code
pub fn lookup_zipcode(zip: &str) -> Option<(String, String)> {
    if zip.len() != 5 || !zip.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Avoid zipcodes::matching to suppress debug_print output.
    let results = zipcodes::filter_by(vec![|z: &zipcodes::Zipcode| z.zip_code == zip], None).ok()?;
    let info = results.first()?;
    Some((info.city.clone(), info.state.clone()))
}

/// "City, ST" label for a zip code, used to decorate search results
pub fn format_location(zip: &str) -> Option<String> {
    lookup_zipcode(zip).map(|(city, state)| format!("{}, {}", city, state))
}
