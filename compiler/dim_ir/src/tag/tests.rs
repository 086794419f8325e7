use super::*;

#[test]
fn raw_round_trips_for_every_tag() {
    for tag in Tag::ALL {
        assert_eq!(Tag::from_raw(tag.raw()), Some(tag), "{tag}");
    }
}

#[test]
fn all_tags_are_distinct() {
    let mut raws: Vec<u16> = Tag::ALL.iter().map(|t| t.raw()).collect();
    raws.sort_unstable();
    raws.dedup();
    assert_eq!(raws.len(), Tag::ALL.len());
}

#[test]
fn word_carries_version_bits() {
    let word = Tag::StructureType.word();
    assert_eq!(word & VERSION_MASK, VERSION_WORD);
    assert_eq!(word & !VERSION_MASK, 0x13);
    assert_eq!(Tag::from_word(word), Some(Tag::StructureType));
}

#[test]
fn unversioned_word_is_not_a_tag() {
    // A location's line number sits where a tag word would be.
    assert_eq!(Tag::from_word(0x11), None);
    assert_eq!(Tag::from_word(u64::from(Tag::CompileUnit.raw())), None);
}

#[test]
fn unknown_raw_value_is_not_a_tag() {
    assert_eq!(Tag::from_raw(0x7fff), None);
    assert_eq!(Tag::from_word(0x7fff | VERSION_WORD), None);
}

#[test]
fn names_use_dwarf_spelling() {
    assert_eq!(Tag::Subprogram.name(), "DW_TAG_subprogram");
    assert_eq!(Tag::AppleProperty.to_string(), "DW_TAG_APPLE_property");
    assert_eq!(format!("{:?}", Tag::Member), "Tag::DW_TAG_member");
}
