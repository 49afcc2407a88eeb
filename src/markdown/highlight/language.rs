//! Fence moniker → highlighting language resolution.
//!
//! Monikers are matched case-insensitively against a fixed alias table. When
//! that fails the block's first line is consulted: shebangs, editor modelines
//! and a few well-known document prologues. Anything else is `None`, the
//! expected answer for diagram and plain-text fences.

use std::sync::LazyLock;

use regex::Regex;

/// Languages the highlighter knows how to format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Bash,
    C,
    Clojure,
    Cpp,
    CSharp,
    Css,
    D,
    Diff,
    Erlang,
    Go,
    Haskell,
    Html,
    Java,
    JavaScript,
    Json,
    Latex,
    Lua,
    Makefile,
    Markdown,
    ObjectiveC,
    OCaml,
    Perl,
    Php,
    Python,
    R,
    Ruby,
    Rust,
    Scala,
    Sql,
    Xml,
    Yaml,
}

impl Language {
    /// Canonical identifier (`CSharp`, `JavaScript`).
    pub const fn id(self) -> &'static str {
        match self {
            Self::Bash => "Bash",
            Self::C => "C",
            Self::Clojure => "Clojure",
            Self::Cpp => "Cpp",
            Self::CSharp => "CSharp",
            Self::Css => "Css",
            Self::D => "D",
            Self::Diff => "Diff",
            Self::Erlang => "Erlang",
            Self::Go => "Go",
            Self::Haskell => "Haskell",
            Self::Html => "Html",
            Self::Java => "Java",
            Self::JavaScript => "JavaScript",
            Self::Json => "Json",
            Self::Latex => "Latex",
            Self::Lua => "Lua",
            Self::Makefile => "Makefile",
            Self::Markdown => "Markdown",
            Self::ObjectiveC => "ObjectiveC",
            Self::OCaml => "OCaml",
            Self::Perl => "Perl",
            Self::Php => "Php",
            Self::Python => "Python",
            Self::R => "R",
            Self::Ruby => "Ruby",
            Self::Rust => "Rust",
            Self::Scala => "Scala",
            Self::Sql => "Sql",
            Self::Xml => "Xml",
            Self::Yaml => "Yaml",
        }
    }

    /// Name of the matching syntax in the bundled syntect syntax set.
    pub const fn syntax_name(self) -> &'static str {
        match self {
            Self::Bash => "Bourne Again Shell (bash)",
            Self::C => "C",
            Self::Clojure => "Clojure",
            Self::Cpp => "C++",
            Self::CSharp => "C#",
            Self::Css => "CSS",
            Self::D => "D",
            Self::Diff => "Diff",
            Self::Erlang => "Erlang",
            Self::Go => "Go",
            Self::Haskell => "Haskell",
            Self::Html => "HTML",
            Self::Java => "Java",
            Self::JavaScript => "JavaScript",
            Self::Json => "JSON",
            Self::Latex => "LaTeX",
            Self::Lua => "Lua",
            Self::Makefile => "Makefile",
            Self::Markdown => "Markdown",
            Self::ObjectiveC => "Objective-C",
            Self::OCaml => "OCaml",
            Self::Perl => "Perl",
            Self::Php => "PHP",
            Self::Python => "Python",
            Self::R => "R",
            Self::Ruby => "Ruby",
            Self::Rust => "Rust",
            Self::Scala => "Scala",
            Self::Sql => "SQL",
            Self::Xml => "XML",
            Self::Yaml => "YAML",
        }
    }
}

/// Moniker aliases, lowercase.
const MONIKERS: &[(&str, Language)] = &[
    ("bash", Language::Bash),
    ("sh", Language::Bash),
    ("shell", Language::Bash),
    ("zsh", Language::Bash),
    ("c", Language::C),
    ("h", Language::C),
    ("clojure", Language::Clojure),
    ("clj", Language::Clojure),
    ("cpp", Language::Cpp),
    ("c++", Language::Cpp),
    ("cc", Language::Cpp),
    ("cxx", Language::Cpp),
    ("hpp", Language::Cpp),
    ("cs", Language::CSharp),
    ("csharp", Language::CSharp),
    ("c#", Language::CSharp),
    ("css", Language::Css),
    ("d", Language::D),
    ("diff", Language::Diff),
    ("patch", Language::Diff),
    ("erlang", Language::Erlang),
    ("erl", Language::Erlang),
    ("go", Language::Go),
    ("golang", Language::Go),
    ("haskell", Language::Haskell),
    ("hs", Language::Haskell),
    ("html", Language::Html),
    ("htm", Language::Html),
    ("xhtml", Language::Html),
    ("java", Language::Java),
    ("javascript", Language::JavaScript),
    ("js", Language::JavaScript),
    ("mjs", Language::JavaScript),
    ("node", Language::JavaScript),
    ("json", Language::Json),
    ("latex", Language::Latex),
    ("tex", Language::Latex),
    ("lua", Language::Lua),
    ("make", Language::Makefile),
    ("makefile", Language::Makefile),
    ("markdown", Language::Markdown),
    ("md", Language::Markdown),
    ("objc", Language::ObjectiveC),
    ("objective-c", Language::ObjectiveC),
    ("objectivec", Language::ObjectiveC),
    ("ocaml", Language::OCaml),
    ("ml", Language::OCaml),
    ("perl", Language::Perl),
    ("pl", Language::Perl),
    ("php", Language::Php),
    ("python", Language::Python),
    ("py", Language::Python),
    ("r", Language::R),
    ("ruby", Language::Ruby),
    ("rb", Language::Ruby),
    ("rust", Language::Rust),
    ("rs", Language::Rust),
    ("scala", Language::Scala),
    ("sql", Language::Sql),
    ("xml", Language::Xml),
    ("xaml", Language::Xml),
    ("svg", Language::Xml),
    ("yaml", Language::Yaml),
    ("yml", Language::Yaml),
];

/// Document prologues recognised on a block's first line.
static PROLOGUES: LazyLock<Vec<(Regex, Language)>> = LazyLock::new(|| {
    [
        (r"(?i)^\s*<\?xml\b", Language::Xml),
        (r"(?i)^\s*<\?php\b", Language::Php),
        (r"(?i)^\s*<!doctype\s+html\b", Language::Html),
        (r"^diff --git ", Language::Diff),
    ]
    .into_iter()
    .filter_map(|(pattern, language)| Regex::new(pattern).ok().map(|re| (re, language)))
    .collect()
});

/// Emacs (`-*- mode: python -*-`) and vim (`vim: set ft=ruby:`) modelines.
static MODELINE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"-\*-\s*(?:mode:\s*)?([\w+#-]+)\s*(?:;[^*]*)?-\*-|vim?:.*\b(?:ft|filetype|syntax)=([\w+#-]+)")
        .ok()
});

/// Look a moniker up in the alias table.
pub fn from_moniker(moniker: &str) -> Option<Language> {
    MONIKERS
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(moniker))
        .map(|(_, language)| *language)
}

/// Resolve a fence moniker (info prefix already stripped) to a language,
/// consulting the block's first line when the moniker is unknown.
pub fn resolve(moniker: &str, first_line: Option<&str>) -> Option<Language> {
    from_moniker(moniker).or_else(|| first_line.and_then(from_first_line))
}

/// Best-effort guess from the first line of a block.
pub fn from_first_line(line: &str) -> Option<Language> {
    from_shebang(line)
        .or_else(|| from_modeline(line))
        .or_else(|| {
            PROLOGUES
                .iter()
                .find(|(re, _)| re.is_match(line))
                .map(|(_, language)| *language)
        })
}

/// `#!/bin/bash`, `#!/usr/bin/env -S python3 -u`, `#!/usr/bin/ruby2.7`.
fn from_shebang(line: &str) -> Option<Language> {
    let command = line.strip_prefix("#!")?;
    let mut words = command.split_whitespace();
    let mut program = basename(words.next()?);
    if program == "env" {
        program = basename(words.find(|w| !w.starts_with('-'))?);
    }
    let program = program.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
    from_moniker(program)
}

fn from_modeline(line: &str) -> Option<Language> {
    let captures = MODELINE.as_ref()?.captures(line)?;
    let name = captures.get(1).or_else(|| captures.get(2))?;
    from_moniker(name.as_str())
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(resolve("js", None), Some(Language::JavaScript));
        assert_eq!(resolve("javascript", None), Some(Language::JavaScript));
        assert_eq!(resolve("cs", None), Some(Language::CSharp));
        assert_eq!(resolve("csharp", None), Some(Language::CSharp));
        assert_eq!(resolve("c#", None), Some(Language::CSharp));
        assert_eq!(resolve("rs", None), Some(Language::Rust));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(resolve("CSharp", None), Some(Language::CSharp));
        assert_eq!(resolve("JS", None), Some(Language::JavaScript));
        assert_eq!(resolve("Yaml", None), Some(Language::Yaml));
    }

    #[test]
    fn test_unknown_is_none() {
        assert_eq!(resolve("mermaid", None), None);
        assert_eq!(resolve("text", None), None);
        assert_eq!(resolve("plantuml", Some("@startuml")), None);
        assert_eq!(resolve("mermaid", Some("sequenceDiagram")), None);
    }

    #[test]
    fn test_direct_match_wins_over_first_line() {
        assert_eq!(
            resolve("ruby", Some("#!/usr/bin/env python3")),
            Some(Language::Ruby)
        );
    }

    #[test]
    fn test_shebang() {
        assert_eq!(resolve("console", Some("#!/bin/bash")), Some(Language::Bash));
        assert_eq!(resolve("script", Some("#!/bin/sh -e")), Some(Language::Bash));
        assert_eq!(
            resolve("script", Some("#!/usr/bin/env python3")),
            Some(Language::Python)
        );
        assert_eq!(
            resolve("script", Some("#!/usr/bin/env -S node --harmony")),
            Some(Language::JavaScript)
        );
        assert_eq!(
            resolve("script", Some("#!/usr/local/bin/ruby2.7")),
            Some(Language::Ruby)
        );
        assert_eq!(resolve("script", Some("#!/usr/bin/awk -f")), None);
    }

    #[test]
    fn test_modeline() {
        assert_eq!(from_first_line("# -*- mode: python -*-"), Some(Language::Python));
        assert_eq!(from_first_line("-- -*- lua -*-"), Some(Language::Lua));
        assert_eq!(from_first_line("# vim: set ft=ruby:"), Some(Language::Ruby));
    }

    #[test]
    fn test_prologues() {
        assert_eq!(
            resolve("config", Some("<?xml version=\"1.0\"?>")),
            Some(Language::Xml)
        );
        assert_eq!(resolve("tpl", Some("<?php echo 1;")), Some(Language::Php));
        assert_eq!(resolve("page", Some("<!DOCTYPE html>")), Some(Language::Html));
        assert_eq!(
            resolve("change", Some("diff --git a/x b/x")),
            Some(Language::Diff)
        );
    }

    #[test]
    fn test_ids() {
        assert_eq!(Language::CSharp.id(), "CSharp");
        assert_eq!(Language::CSharp.syntax_name(), "C#");
        assert_eq!(Language::JavaScript.id(), "JavaScript");
    }
}
