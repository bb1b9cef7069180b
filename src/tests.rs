#[cfg(test)]
mod tests {
    use {
        crate::balance::BalanceFetcher,
        crate::export::render_csv,
        crate::layout::detect_roster,
        crate::pipeline::collect_records,
        crate::resolver::AddressResolver,
        async_trait::async_trait,
        std::time::Duration,
    };

    const LEAGUE_PAGE: &str = r#"
        <ul class="groupUserList">
            <li class="groupUserList__item"><span>Hero One</span><span>#1001</span></li>
            <li class="groupUserList__item"><span>Hero Two</span><span>#1002</span></li>
        </ul>"#;

    /// Resolver that knows one user and fails (returns "") for the rest.
    struct OneUserResolver;

    #[async_trait]
    impl AddressResolver for OneUserResolver {
        async fn resolve(&self, user_id: &str) -> String {
            if user_id == "1001" {
                "0xaaa0000000000000000000000000000000000001".to_string()
            } else {
                String::new()
            }
        }
    }

    /// Fetcher standing in for an RPC node that reports 0x64 for everyone.
    struct HundredFetcher;

    #[async_trait]
    impl BalanceFetcher for HundredFetcher {
        async fn fetch_balance(&self, _address: &str, _user_id: &str) -> String {
            crate::balance::decode_quantity(Some("0x64"))
        }
    }

    /// Full flow: extract → resolve → fetch → render, one resolvable user
    /// and one resolver failure.
    #[tokio::test]
    async fn test_end_to_end_two_users() {
        let roster = detect_roster(LEAGUE_PAGE);
        assert_eq!(roster.len(), 2);

        let records = collect_records(
            &roster,
            &OneUserResolver,
            &HundredFetcher,
            Duration::from_millis(0),
        )
        .await;

        assert_eq!(records.len(), roster.len());

        let csv = render_csv(&records);
        let body = csv.strip_prefix('\u{feff}').unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            r#"1001,"Hero One","0xaaa0000000000000000000000000000000000001","",100"#
        );
        assert_eq!(lines[2], r#"1002,"Hero Two","","",0"#);
    }

    /// A page with neither layout aborts before any per-user work.
    #[test]
    fn test_no_roster_means_empty_extraction() {
        let roster = detect_roster("<html><body><p>profile page</p></body></html>");
        assert!(roster.is_empty());
    }
}
