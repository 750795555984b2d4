use email_detector::*;

// --- Basic detection ---

#[test]
fn test_extract_in_order() {
    let text = "first@domain.com then admin@test.org";
    assert!(contains(text));
    assert_eq!(extract(text), vec!["first@domain.com", "admin@test.org"]);
}

#[test]
fn test_extract_deduplicates() {
    let text = "Write to bob@example.org, or bob@example.org again";
    assert_eq!(extract(text), vec!["bob@example.org"]);
}

#[test]
fn test_no_address() {
    assert!(!contains("nothing to see here"));
    assert!(!contains("user @domain.com"));
    assert!(!contains("user@ domain.com"));
    assert!(!contains("a@b"));
    assert!(!contains(""));
    assert!(extract("plain text only").is_empty());
}

#[test]
fn test_address_literals_not_scanned() {
    assert!(!contains("Server: user@[192.168.1.1]"));
    assert!(!contains("text user@[IPv6:2001:db8::1] more"));
    assert!(is_valid("user@[192.168.1.1]"));
}

#[test]
fn test_find_reports_spans() {
    let text = "Contact: user@example.com.";
    let matches = EmailScanner::new().find(text);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].as_str(), "user@example.com");
    assert_eq!(matches[0].span, Span::new(9, 25));
    assert_eq!(&text[matches[0].span.range()], "user@example.com");
    assert_eq!(matches[0].local_part(), "user");
    assert_eq!(matches[0].domain(), "example.com");
}

// --- Delimiters ---

#[test]
fn test_punctuation_delimiters() {
    assert_eq!(extract("Email:user@domain.com;note"), vec!["user@domain.com"]);
    assert_eq!(extract("List[user@domain.com]end"), vec!["user@domain.com"]);
    assert_eq!(extract("Start<user@domain.com>end"), vec!["user@domain.com"]);
    assert_eq!(extract("(contact: admin@site.co.uk)"), vec!["admin@site.co.uk"]);
    assert_eq!(extract("Email user@example.com!"), vec!["user@example.com"]);
    assert_eq!(extract("Emails: a@b.co, x@y.org"), vec!["a@b.co", "x@y.org"]);
}

#[test]
fn test_quote_delimiters() {
    assert_eq!(extract("Start'user@domain.com'end"), vec!["user@domain.com"]);
    assert_eq!(extract("Start\"user@domain.com\"end"), vec!["user@domain.com"]);
    assert_eq!(extract("Start`user@domain.com`end"), vec!["user@domain.com"]);
    assert_eq!(extract("email='user@domain.com'"), vec!["user@domain.com"]);
    assert_eq!(extract("user=\"alpha@domin.co.uk\""), vec!["alpha@domin.co.uk"]);
    assert_eq!(extract("user=`alpha@domin.co.uk`"), vec!["alpha@domin.co.uk"]);
}

#[test]
fn test_unmatched_quotes_are_local_part() {
    assert_eq!(
        extract("That's john'semail@example.com works"),
        vec!["john'semail@example.com"]
    );
    assert_eq!(
        extract("email='alpha@domin.co.uk"),
        vec!["email='alpha@domin.co.uk"]
    );
    assert_eq!(
        extract("user=`alpha@domin.co.uk"),
        vec!["user=`alpha@domin.co.uk"]
    );
    assert_eq!(extract("user=\"alpha@domin.co.uk"), vec!["alpha@domin.co.uk"]);
}

#[test]
fn test_repeated_quote_runs() {
    // Quote runs are consumed pairwise on the left; the trailing run is left out
    assert_eq!(
        extract("'''user@domain.com'''"),
        vec!["'''user@domain.com"]
    );
}

#[test]
fn test_uri_prefixes() {
    assert_eq!(extract("mailto:user@domain.com"), vec!["user@domain.com"]);
    assert_eq!(extract("http://user@domain.com"), vec!["user@domain.com"]);
    assert_eq!(
        extract("price=$19.99,contact:user@domain.com"),
        vec!["user@domain.com"]
    );
}

// --- Noise recovery ---

#[test]
fn test_recover_after_noise() {
    assert_eq!(extract("text###@@@user@domain.com"), vec!["user@domain.com"]);
    assert_eq!(
        extract("text!!!%(%)%$$$user@domain.com"),
        vec!["user@domain.com"]
    );
    assert_eq!(extract("noise@@valid@domain.com"), vec!["valid@domain.com"]);
}

#[test]
fn test_symbols_kept_in_local_part() {
    assert_eq!(extract("$user@domain.com"), vec!["$user@domain.com"]);
    assert_eq!(extract("###user@domain.com"), vec!["###user@domain.com"]);
    assert_eq!(extract("value=user@domain.com"), vec!["value=user@domain.com"]);
    assert_eq!(extract("x ++--%@somedomain.co.uk"), vec!["++--%@somedomain.co.uk"]);
}

#[test]
fn test_symbol_runs_in_prose() {
    let text = "27 age and !-+alphatyicbnkdleo$#-=+xkthes123fd56569565@somedomain.com and othere data missing...!";
    assert_eq!(
        extract(text),
        vec!["alphatyicbnkdleo$#-=+xkthes123fd56569565@somedomain.com"]
    );

    let text = "27 age and alphatyicbnkdleo$#-=+xkthes?--=:-+123fd56569565@gmail.co.uk and othere data missing...!";
    assert_eq!(extract(text), vec!["123fd56569565@gmail.co.uk"]);

    let text = "27 age and alphatyicbnk.?'.,dleoxkthes123fd56569565@gmail.com and othere data missing...! other@email.co.in";
    assert_eq!(
        extract(text),
        vec!["dleoxkthes123fd56569565@gmail.com", "other@email.co.in"]
    );
}

#[test]
fn test_dot_runs() {
    assert_eq!(extract("user..name@domain.com"), vec!["name@domain.com"]);
    assert_eq!(extract("..user@domain.com"), vec!["user@domain.com"]);
    assert_eq!(extract(".user@domain.com"), vec!["user@domain.com"]);
    assert_eq!(extract("user....email@domain.com"), vec!["email@domain.com"]);
    assert!(!contains("user...@domain.com"));
    assert!(!contains("user..@domain.com"));
    assert!(!contains("user.@domain.com"));
}

#[test]
fn test_invalid_character_before_at() {
    assert!(!contains("user\"@domain.com"));
    assert!(!contains("user(@domain.com"));
    assert!(!contains("user\\@domain.com"));
    assert!(!contains("user@@domain.com"));
    assert!(contains("user!@domain.com"));
}

#[test]
fn test_non_ascii_rejected() {
    assert!(!contains("userñ@domain.com"));
    assert!(!contains("user@domainñ.com"));
}

// --- Chained addresses ---

#[test]
fn test_chained_at_signs() {
    assert_eq!(extract("user@domain@com"), vec!["user@domain", "domain@com"]);
    assert_eq!(
        extract("first@domain.com@second@test.org"),
        vec!["first@domain.com", "domain.com@second", "second@test.org"]
    );
    assert_eq!(extract("a@b.com#@c.org"), vec!["a@b.com", "b.com#@c.org"]);
}

#[test]
fn test_chain_with_symbols() {
    let text = "In this paragraph first@domain.com#@second!@test.org!@alpha.in please check";
    assert_eq!(
        extract(text),
        vec![
            "first@domain.com",
            "domain.com#@second",
            "second!@test.org",
            "test.org!@alpha.in",
        ]
    );
}

#[test]
fn test_chain_breaks() {
    assert_eq!(
        extract("text@user.com@domain."),
        vec!["text@user.com", "user.com@domain"]
    );
    assert_eq!(
        extract("text123@user.com!@domain.in"),
        vec!["text123@user.com", "user.com!@domain.in"]
    );
    assert_eq!(extract("text@user.com @domain.in"), vec!["text@user.com"]);
    assert_eq!(extract("text@user.com.@domain.in"), vec!["text@user.com"]);
    assert_eq!(extract("user@domain.com@"), vec!["user@domain.com"]);
}

// --- Structured text ---

#[test]
fn test_json_document() {
    let text = r#"{
  "type": "service_account",
  "client_email": "my-service-account@your-gcp-project-12345.iam.gserviceaccount.com",
  "client_x509_cert_url": "https://www.googleapis.com/robot/v1/metadata/x509/my-service-account%40your-gcp-project-12345.iam.gserviceaccount.com"
}"#;
    assert_eq!(
        extract(text),
        vec!["my-service-account@your-gcp-project-12345.iam.gserviceaccount.com"]
    );
}

#[test]
fn test_domain_stops_at_whitespace() {
    assert_eq!(extract("user@domain .com"), vec!["user@domain"]);
    assert_eq!(extract("user@domain.com\ntext"), vec!["user@domain.com"]);
}

// --- Configuration ---

#[test]
fn test_conservative_charset() {
    let config = Config {
        policy: Policy {
            scan_charset: ScanCharset::Conservative,
            ..Policy::default()
        },
        ..Config::default()
    };
    let scanner = EmailScanner::with_config(config);

    assert!(scanner.contains("mail first.last+tag@example.com now"));
    assert_eq!(scanner.extract("mail us$er@example.com now"), vec!["er@example.com"]);
    assert_eq!(scanner.extract("it's o'brien@example.com"), vec!["brien@example.com"]);
    assert!(!scanner.contains("mail $$$@example.com now"));

    // The default charset keeps the apostrophe
    assert_eq!(extract("it's o'brien@example.com"), vec!["o'brien@example.com"]);
}

#[test]
fn test_extract_cap() {
    let mut config = Config::default();
    config.limits.max_extract = 2;
    let scanner = EmailScanner::with_config(config);

    let text = "a1@x.com b2@x.com c3@x.com";
    assert_eq!(scanner.extract(text), vec!["a1@x.com", "b2@x.com"]);
}

#[test]
fn test_iteration_budget_keeps_partial_results() {
    let mut config = Config::default();
    config.limits.max_scan_iterations = 2;
    let scanner = EmailScanner::with_config(config);

    let text = "a1@x.com b2@x.com c3@x.com";
    assert_eq!(scanner.extract(text), vec!["a1@x.com", "b2@x.com"]);
    assert!(matches!(
        scanner.try_find(text),
        Err(DetectError::IterationBudgetExhausted(2))
    ));
    assert_eq!(scanner.stats().errors(), 1);
}

#[test]
fn test_scan_budget_keeps_partial_results() {
    let mut config = Config::default();
    config.limits.max_total_scanned = 20;
    let scanner = EmailScanner::with_config(config);

    let text = "aaaa1@x.com bbbb2@x.com cccc3@x.com";
    assert_eq!(scanner.extract(text), vec!["aaaa1@x.com"]);
    assert_eq!(scanner.stats().errors(), 1);
    assert!(matches!(
        scanner.try_find(text),
        Err(DetectError::ScanBudgetExhausted(22))
    ));
    assert!(scanner.contains(text));
}

#[test]
fn test_oversized_input() {
    let mut config = Config::default();
    config.limits.max_input_size = 16;
    let scanner = EmailScanner::with_config(config);

    let text = "padding padding user@example.com";
    assert!(!scanner.contains(text));
    assert!(scanner.extract(text).is_empty());
    assert!(matches!(
        scanner.try_find(text),
        Err(DetectError::InputTooLarge { max: 16, .. })
    ));
}

#[test]
fn test_scanner_stats() {
    let scanner = EmailScanner::new();
    assert!(scanner.contains("mail user@example.com"));
    assert!(!scanner.contains("abc"));
    let _ = scanner.extract("mail user@example.com");

    let snapshot = scanner.stats().snapshot();
    assert_eq!(snapshot.scans, 2);
    assert_eq!(snapshot.extracts, 1);
    assert_eq!(snapshot.errors, 1);
}

#[test]
fn test_shared_instances() {
    assert!(std::ptr::eq(shared_scanner(), shared_scanner()));
    assert!(std::ptr::eq(shared_validator(), shared_validator()));
    assert_eq!(shared_scanner().config(), &Config::default());
}
