//! Search command construction.
//!
//! Produces the shell pipeline whose output the line source consumes:
//! a `find` that prunes hidden entries and `tags` files and runs a
//! case-insensitive, line-numbered `grep` over everything else.

/// Build the producer command for `pattern`, optionally pruning `ignore`.
///
/// Both values are shell-quoted, so patterns may contain quotes, `$`,
/// backslashes or a leading `-`. `find -name` only matches a final path
/// component, so `ignore` is cut at its first `/` (`build/` prunes `build`).
/// Nothing is pruned when that leaves an empty name.
pub fn search_command(pattern: &str, ignore: Option<&str>) -> String {
    // `-e` keeps a pattern starting with `-` from being read as an option.
    let grep = format!("-exec grep -in -e {} {{}} +", shell_words::quote(pattern));

    let ignore = ignore
        .and_then(|path| path.split('/').next())
        .filter(|name| !name.is_empty());
    match ignore {
        Some(path) => format!(
            r"find . \( -name '.?*' -o -name {} -o -name tags \) -prune -o {grep}",
            shell_words::quote(path)
        ),
        None => format!(r"find . \( -name '.?*' -o -name tags \) -prune -o {grep}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_pattern_builds_find_grep_pipeline() {
        assert_eq!(
            search_command("hello", None),
            r"find . \( -name '.?*' -o -name tags \) -prune -o -exec grep -in -e hello {} +"
        );
    }

    #[test]
    fn ignore_path_joins_the_prune_group() {
        let cmd = search_command("hello$", Some("main.c"));
        assert!(
            cmd.starts_with(r"find . \( -name '.?*' -o -name main.c -o -name tags \) -prune"),
            "got: {cmd}"
        );
        assert!(cmd.contains("-e 'hello$'"), "got: {cmd}");
    }

    #[test]
    fn ignore_path_is_cut_at_first_slash() {
        let cmd = search_command("hello", Some("build/out"));
        assert!(
            cmd.starts_with(r"find . \( -name '.?*' -o -name build -o -name tags \) -prune"),
            "got: {cmd}"
        );
    }

    #[test]
    fn ignore_path_with_leading_slash_prunes_nothing_extra() {
        assert_eq!(search_command("hello", Some("/tmp")), search_command("hello", None));
    }

    #[test]
    fn pattern_with_spaces_stays_one_argument() {
        let cmd = search_command("hello world", None);
        assert!(cmd.contains("-e 'hello world' {} +"), "got: {cmd}");
    }

    #[test]
    fn single_quotes_in_pattern_are_escaped() {
        let cmd = search_command("it's", None);
        let words = shell_words::split(&cmd).unwrap();
        assert!(words.contains(&"it's".to_string()), "got: {words:?}");
    }

    #[test]
    fn leading_dash_pattern_is_not_an_option() {
        let cmd = search_command("-v", None);
        let words = shell_words::split(&cmd).unwrap();
        let e = words.iter().position(|w| w == "-e").unwrap();
        assert_eq!(words[e + 1], "-v");
    }

    #[cfg(unix)]
    #[test]
    fn command_round_trips_through_the_shell() {
        let cmd = search_command("a'b \"c\" $HOME \\", Some("dir with space"));
        let words = shell_words::split(&cmd).unwrap();
        assert!(words.contains(&"a'b \"c\" $HOME \\".to_string()));
        assert!(words.contains(&"dir with space".to_string()));
    }
}
