use crate::domain::model::Page;
use crate::domain::ports::UserInterface;

/// 終端機 UI: alert 直接印出, 導頁印出目標頁面檔名
#[derive(Debug, Clone)]
pub struct ConsoleUi {
    login_page: String,
    dashboard_page: String,
}

impl ConsoleUi {
    pub fn new(login_page: impl Into<String>, dashboard_page: impl Into<String>) -> Self {
        Self {
            login_page: login_page.into(),
            dashboard_page: dashboard_page.into(),
        }
    }

    pub fn page_file_name(&self, page: Page) -> &str {
        match page {
            Page::Login => &self.login_page,
            Page::Dashboard => &self.dashboard_page,
        }
    }
}

impl Default for ConsoleUi {
    fn default() -> Self {
        Self::new(
            Page::Login.default_file_name(),
            Page::Dashboard.default_file_name(),
        )
    }
}

impl UserInterface for ConsoleUi {
    fn alert(&self, message: &str) {
        println!("{}", message);
    }

    fn navigate(&self, page: Page) {
        let target = self.page_file_name(page);
        tracing::info!("➡️  Navigating to {}", target);
        println!("➡️  {}", target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_file_names() {
        let ui = ConsoleUi::default();
        assert_eq!(ui.page_file_name(Page::Login), "login.html");
        assert_eq!(ui.page_file_name(Page::Dashboard), "dashboard.html");

        let ui = ConsoleUi::new("signin.html", "home.html");
        assert_eq!(ui.page_file_name(Page::Dashboard), "home.html");
    }
}
