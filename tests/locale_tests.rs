//! Replies in other locales. The locale is process-wide, so everything that
//! switches it lives in this one test binary and one test.

mod common;

use calendar_assistant::components::chat::ChatService;
use calendar_assistant::utils::i18n::set_locale;

#[tokio::test]
async fn test_replies_follow_the_configured_locale() {
    let state = common::app_state();

    set_locale("fi");
    let reply = state.chat.reply("Add meeting at 2pm").await;
    assert_eq!(reply.response, "Lisäsin kalenteriisi tapahtuman \"Add meeting\".");
    assert_eq!(
        ChatService::failure_reply().response,
        "Anteeksi, tapahtui virhe. Yritä uudelleen."
    );

    let processed = state.calendar.process_message("Remind me about the report");
    assert_eq!(
        processed.response,
        "En löytänyt viestistäsi tapahtuman tietoja. Voisitko kertoa tapahtuman ajan ja päivämäärän?"
    );

    // Unknown locales fall back to English
    set_locale("xx");
    let reply = state.chat.reply("Add meeting at 2pm").await;
    assert_eq!(reply.response, "I've added \"Add meeting\" to your calendar.");
}
