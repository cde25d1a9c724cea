#![no_main]

use libfuzzer_sys::fuzz_target;
use rsprintf_core::{check_template, snprintf, FormatArg, TemplateIssue};

// Cross-checks the static checker against the renderer: a template the
// checker calls clean renders identically with a surplus argument
// appended, and the surplus itself is the only new diagnostic.
fuzz_target!(|data: &[u8]| {
    let Some((seed, template)) = data.split_first() else {
        return;
    };
    if template.len() > 64 {
        return;
    }
    if template.windows(5).any(|w| w.iter().all(u8::is_ascii_digit)) {
        return;
    }

    let args: Vec<FormatArg<'_>> = match seed % 3 {
        0 => vec![],
        1 => vec![FormatArg::Int(1234), FormatArg::Uint(0xfade)],
        _ => vec![
            FormatArg::Float(1.5),
            FormatArg::Str(b"probe"),
            FormatArg::Char(b'#'),
        ],
    };

    let issues = check_template(template, &args);
    if !issues.is_empty() {
        return;
    }

    let mut base = [0u8; 256];
    let base_len = snprintf(&mut base, template, &args);

    let mut extended_args = args.clone();
    extended_args.push(FormatArg::Int(99));
    let mut extended = [0u8; 256];
    let extended_len = snprintf(&mut extended, template, &extended_args);

    assert_eq!(base_len, extended_len, "surplus argument changed the length");
    let kept = base_len.min(base.len() - 1);
    assert_eq!(&base[..kept], &extended[..kept], "surplus argument changed content");

    let extended_issues = check_template(template, &extended_args);
    assert!(
        extended_issues
            .iter()
            .all(|issue| matches!(issue, TemplateIssue::UnusedArguments { .. })),
        "unexpected diagnostics: {extended_issues:?}"
    );
    assert!(!extended_issues.is_empty(), "surplus argument went unreported");
});
