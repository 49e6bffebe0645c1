use hickory_proto::rr::RecordType;

/// `name|qtype`, with the name normalized and the type in numeric form.
#[inline]
pub fn cache_key(name: &str, record_type: RecordType) -> String {
    let name = name.strip_suffix('.').unwrap_or(name);
    let mut key = String::with_capacity(name.len() + 6);
    key.extend(name.chars().map(|c| c.to_ascii_lowercase()));
    key.push('|');
    key.push_str(&u16::from(record_type).to_string());
    key
}
