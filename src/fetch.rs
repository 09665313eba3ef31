//! Fetches the raw page source for the tours page.

const URL: &str = "https://programmer100.pythonanywhere.com/tours/";

// Some hosts refuse requests without a browser-looking User-Agent.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_10_1) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/39.0.2171.95 Safari/537.36";

pub(crate) async fn fetch_page() -> anyhow::Result<String> {
    let response = crate::CLIENT
        .get(URL)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await?;

    Ok(response.error_for_status()?.text().await?)
}
