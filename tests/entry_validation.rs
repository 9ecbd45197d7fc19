//! Entry construction: accepted values and rejected ones.

use hostsfile::{Entry, Error};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

#[test]
fn ipv4_entry() {
    let e = Entry::parse("192.168.1.1", "server1").unwrap();
    assert_eq!(e.address(), IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1)));
    assert_eq!(e.hostname(), "server1");
    assert!(e.aliases().is_empty());
    assert_eq!(e.comment(), None);
}

#[test]
fn ipv6_entry() {
    let e = Entry::new(IpAddr::V6(Ipv6Addr::LOCALHOST), "localhost").unwrap();
    assert_eq!(e.address().to_string(), "::1");
}

#[test]
fn invalid_address_rejected() {
    assert!(matches!(Entry::parse("256.1.1.1", "a"), Err(Error::InvalidAddress(_))));
    assert!(matches!(Entry::parse("not-an-ip", "a"), Err(Error::InvalidAddress(_))));
    assert!(matches!(Entry::parse("::gg", "a"), Err(Error::InvalidAddress(_))));
}

#[test]
fn empty_or_blank_hostname_rejected() {
    assert!(matches!(Entry::parse("10.0.0.1", ""), Err(Error::InvalidHostname(_))));
    assert!(matches!(Entry::parse("10.0.0.1", "   "), Err(Error::InvalidHostname(_))));
}

#[test]
fn hostname_with_separator_rejected() {
    assert!(Entry::parse("10.0.0.1", "a\tb").is_err());
    assert!(Entry::parse("10.0.0.1", "a\nb").is_err());
    assert!(Entry::parse("10.0.0.1", "a b").is_err());
    assert!(Entry::parse("10.0.0.1", "a#b").is_err());
}

#[test]
fn bad_alias_rejected() {
    let e = Entry::parse("10.0.0.1", "a").unwrap();
    assert!(matches!(e.clone().with_aliases(["ok", ""]), Err(Error::InvalidAlias(_))));
    assert!(matches!(e.with_aliases(["with space"]), Err(Error::InvalidAlias(_))));
}

#[test]
fn comment_with_control_chars_rejected() {
    let e = Entry::parse("10.0.0.1", "a").unwrap();
    for bad in ["line\nbreak", "carriage\rreturn", "tab\tbed"] {
        assert!(
            matches!(e.clone().with_comment(bad), Err(Error::InvalidComment(_))),
            "{bad:?} accepted"
        );
    }
}

#[test]
fn comment_is_trimmed_and_blank_cleared() {
    let e = Entry::parse("10.0.0.1", "a").unwrap();
    assert_eq!(e.clone().with_comment("  prod  ").unwrap().comment(), Some("prod"));
    assert_eq!(e.with_comment("   ").unwrap().comment(), None);
}

#[test]
fn all_names_is_hostname_then_aliases() {
    let e = Entry::parse("10.0.0.1", "web")
        .unwrap()
        .with_aliases(["www", "w"])
        .unwrap();
    let names: Vec<&str> = e.all_names().collect();
    assert_eq!(names, ["web", "www", "w"]);
}

#[test]
fn matches_address_hostname_or_alias_exactly() {
    let e = Entry::parse("10.0.0.1", "web").unwrap().with_aliases(["www"]).unwrap();
    assert!(e.matches("10.0.0.1"));
    assert!(e.matches("web"));
    assert!(e.matches("www"));
    assert!(!e.matches("WEB"));
    assert!(!e.matches("we"));
    assert!(!e.matches("10.0.0.2"));
}

#[test]
fn equality_includes_comment() {
    let a = Entry::parse("10.0.0.1", "web").unwrap();
    let b = a.clone().with_comment("prod").unwrap();
    assert_ne!(a, b);
    assert_eq!(b, Entry::parse("10.0.0.1", "web").unwrap().with_comment("prod").unwrap());
}

#[test]
fn equality_respects_alias_order() {
    let a = Entry::parse("10.0.0.1", "web").unwrap().with_aliases(["x", "y"]).unwrap();
    let b = Entry::parse("10.0.0.1", "web").unwrap().with_aliases(["y", "x"]).unwrap();
    assert_ne!(a, b);
}

#[test]
fn display_is_line_without_newline() {
    let e = Entry::parse("10.0.0.1", "web")
        .unwrap()
        .with_aliases(["www"])
        .unwrap()
        .with_comment("prod")
        .unwrap();
    assert_eq!(e.to_string(), "10.0.0.1\tweb\twww\t# prod");
}

#[test]
fn scoped_ipv6_matches_full_text() {
    let e = Entry::parse("fe80::1%lo0", "localhost").unwrap();
    assert!(e.matches("fe80::1%lo0"));
    assert!(!e.matches("fe80::1"));
}

#[test]
fn zone_distinguishes_addresses() {
    let lo = Entry::parse("fe80::1%lo0", "a").unwrap();
    let en = Entry::parse("fe80::1%en0", "b").unwrap();
    assert_ne!(lo, Entry::parse("fe80::1", "a").unwrap());
    assert!(!lo.conflicts_with(&en));
    assert!(lo.conflicts_with(&Entry::parse("fe80::1%lo0", "c").unwrap()));
}

#[test]
fn zone_only_on_ipv6() {
    assert!(matches!(Entry::parse("10.0.0.1%eth0", "a"), Err(Error::InvalidAddress(_))));
    let v4 = Entry::parse("10.0.0.1", "a").unwrap();
    assert!(matches!(v4.with_zone("eth0"), Err(Error::InvalidAddress(_))));
    let v6 = Entry::parse("fe80::1", "a").unwrap();
    assert!(matches!(v6.clone().with_zone(""), Err(Error::InvalidAddress(_))));
    assert!(matches!(v6.with_zone("lo 0"), Err(Error::InvalidAddress(_))));
}
