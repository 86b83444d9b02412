use std::panic::{PanicHookInfo, take_hook};
use std::thread;

/// Installs a global panic hook that logs panics via `tracing` before
/// delegating to the previously installed hook.
pub fn install() {
    let previous_hook = take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let location = panic_info
                .location()
                .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
                .unwrap_or_else(|| "<unknown>".to_string());
            let thread_name = thread::current()
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| "<unnamed>".to_string());

            tracing::error!(
                target: "air_insight::panic",
                thread = %thread_name,
                location = %location,
                payload = %panic_payload_to_string(panic_info),
                "PANIC"
            );
        }));

        previous_hook(panic_info);
    }));
}

fn panic_payload_to_string(panic_info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = panic_info.payload().downcast_ref::<&'static str>() {
        return (*s).to_string();
    }
    if let Some(s) = panic_info.payload().downcast_ref::<String>() {
        return s.clone();
    }
    panic_info.to_string()
}
