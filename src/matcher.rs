//! Fuzzy matching of release-artifact names against a semantic version
//!
//! Third-party release feeds label artifacts with highly inconsistent naming
//! ("v3.3.1", "3.3.1-npm-packages", "docutils-0.10"). This module decides
//! which of a list of such names actually denote a given version, tolerating
//! separator style and noise affixes while rejecting version-prefix
//! collisions like "1.0.10" for version "0.10".

/// Separators recognized inside version strings
const SEPARATORS: [char; 3] = ['-', '_', '.'];

/// Trailing tokens that carry no version information
const IGNORABLE_AFFIXES: [&str; 3] = ["rel", "release", "final"];

/// One normalized rewriting of a version string, valid only for the duration
/// of a single matching call.
struct VersionVariant {
    text: String,
    separators: Vec<char>,
}

/// Returns the subset of `names` judged to denote `version`.
///
/// Case-insensitive exact matches short-circuit and are never diluted by
/// fuzzy ones. A non-blank `project_hint` restricts the result to names
/// starting with it, but falls back to the unrestricted result if the
/// restriction would empty it.
///
/// Total function: any input yields a (possibly empty) list, never a panic.
pub fn filter_version_names(
    version: &str,
    names: &[String],
    project_hint: Option<&str>,
) -> Vec<String> {
    if version.trim().is_empty() || names.is_empty() {
        return Vec::new();
    }

    let exact: Vec<String> = names
        .iter()
        .filter(|name| name.eq_ignore_ascii_case(version))
        .cloned()
        .collect();
    if !exact.is_empty() {
        return exact;
    }

    let version_lower = version.to_lowercase();
    let version_has_separator = version_lower.chars().any(|c| SEPARATORS.contains(&c));

    let mut variants = variants_for(&version_lower);
    if let Some(stripped) = strip_trailing_affix(&version_lower) {
        variants.extend(variants_for(&stripped));
    }

    let matched: Vec<String> = names
        .iter()
        .filter(|candidate| {
            let name = strip_ignorable_affixes(&candidate.to_lowercase());

            variants.iter().any(|variant| {
                has_ignorable_suffix_only(&name, variant)
                    || has_ignorable_prefix_only(&name, variant, version_has_separator)
            })
        })
        .cloned()
        .collect();

    match project_hint {
        Some(hint) if !hint.trim().is_empty() => {
            let hint_lower = hint.to_lowercase();
            let hinted: Vec<String> = matched
                .iter()
                .filter(|name| name.to_lowercase().starts_with(&hint_lower))
                .cloned()
                .collect();

            // The hint is advisory: an emptied restriction is ignored.
            if hinted.is_empty() { matched } else { hinted }
        }
        _ => matched,
    }
}

/// Builds the variant set for a version: the version itself with the full
/// separator set, plus one variant per separator with every separator
/// rewritten to it.
fn variants_for(version: &str) -> Vec<VersionVariant> {
    let mut variants = vec![VersionVariant {
        text: version.to_string(),
        separators: SEPARATORS.to_vec(),
    }];

    for sep in SEPARATORS {
        let unified: String = version
            .chars()
            .map(|c| if SEPARATORS.contains(&c) { sep } else { c })
            .collect();
        variants.push(VersionVariant {
            text: unified,
            separators: vec![sep],
        });
    }

    variants
}

/// Strips one trailing ignorable token and its leading separator, e.g.
/// "1.2.3.final" -> "1.2.3".
fn strip_trailing_affix(version: &str) -> Option<String> {
    IGNORABLE_AFFIXES.iter().find_map(|affix| {
        SEPARATORS.iter().find_map(|sep| {
            version
                .strip_suffix(&format!("{sep}{affix}"))
                .map(str::to_string)
        })
    })
}

/// Strips ignorable tokens from both ends of a candidate name, e.g.
/// "release-1.2.3" -> "1.2.3" and "1.2.3-final" -> "1.2.3".
fn strip_ignorable_affixes(name: &str) -> String {
    let mut out = name.to_string();

    for affix in IGNORABLE_AFFIXES {
        for sep in SEPARATORS {
            if let Some(rest) = out.strip_prefix(&format!("{affix}{sep}")) {
                out = rest.to_string();
            }
            if let Some(rest) = out.strip_suffix(&format!("{sep}{affix}")) {
                out = rest.to_string();
            }
        }
    }

    out
}

/// The name starts with the variant and whatever follows is separated by
/// something other than the variant's separators, e.g. for version "3.3.1"
/// accept "3.3.1-npm-packages" but not "3.3.1.0".
fn has_ignorable_suffix_only(name: &str, variant: &VersionVariant) -> bool {
    let Some(tail) = name.strip_prefix(variant.text.as_str()) else {
        return false;
    };

    match tail.chars().next() {
        None => true,
        Some(c) => !variant.separators.contains(&c),
    }
}

/// The name ends with the variant and the prefix ends at a word boundary,
/// e.g. for version "0.10" accept "docutils-0.10" but not "docutils-1.0.10".
fn has_ignorable_prefix_only(
    name: &str,
    variant: &VersionVariant,
    version_has_separator: bool,
) -> bool {
    let Some(head) = name.strip_suffix(variant.text.as_str()) else {
        return false;
    };

    let mut rev = head.chars().rev();
    let last = rev.next();
    let forelast = rev.next();

    // For versions without any separator every separator style is accepted
    // in the prefix, otherwise only the variant's own.
    let separators: &[char] = if version_has_separator {
        &variant.separators
    } else {
        &SEPARATORS
    };

    let Some(last) = last else {
        // Full match with the variant.
        return true;
    };

    // The prefix does not end with a separator or a digit.
    (!separators.contains(&last) && !last.is_ascii_digit())
        // The prefix ends with a separator not preceded by a digit.
        || (separators.contains(&last) && !forelast.is_some_and(|c| c.is_ascii_digit()))
        // The prefix ends with 'v' right after a separator.
        || (last == 'v' && forelast.is_none_or(|c| separators.contains(&c)))
}
