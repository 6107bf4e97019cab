//! Moving and resizing an emulator window by its title.

use anyhow::Result;

/// Moves the first top-level window whose title contains `keyword` to the
/// screen origin and resizes it to `width x height`.
///
/// Hidden windows are candidates too, in `EnumWindows` order. Returns
/// `Ok(false)` when no window matches.
#[cfg(windows)]
pub fn resize_window_by_title(keyword: &str, width: i32, height: i32) -> Result<bool> {
    use anyhow::Context;
    use std::ffi::OsString;
    use std::os::windows::ffi::OsStringExt;
    use windows::Win32::Foundation::{BOOL, HWND, LPARAM, TRUE};
    use windows::Win32::UI::WindowsAndMessaging::{
        EnumWindows, GetWindowTextLengthW, GetWindowTextW, MoveWindow,
    };

    struct EnumData<'a> {
        keyword: &'a str,
        found: Option<(HWND, String)>,
    }

    unsafe extern "system" fn enum_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
        unsafe {
            let data = &mut *(lparam.0 as *mut EnumData);

            let title_len = GetWindowTextLengthW(hwnd).max(0);
            let mut title_buf: Vec<u16> = vec![0; title_len as usize + 1];
            let copied = GetWindowTextW(hwnd, &mut title_buf);
            let title = OsString::from_wide(&title_buf[..copied.max(0) as usize])
                .to_string_lossy()
                .to_string();

            if title.contains(data.keyword) {
                data.found = Some((hwnd, title));
                return BOOL(0); // Stop enumeration
            }
            TRUE
        }
    }

    let mut data = EnumData {
        keyword,
        found: None,
    };
    unsafe {
        // Returns FALSE when the callback stops early
        let _ = EnumWindows(Some(enum_callback), LPARAM(&mut data as *mut _ as isize));
    }

    let Some((hwnd, title)) = data.found else {
        tracing::warn!("No window title contains {:?}", keyword);
        return Ok(false);
    };

    unsafe { MoveWindow(hwnd, 0, 0, width, height, true) }
        .with_context(|| format!("Failed to resize window \"{}\"", title))?;
    tracing::info!("Resized \"{}\" to {}x{} at (0, 0)", title, width, height);
    Ok(true)
}

#[cfg(not(windows))]
pub fn resize_window_by_title(keyword: &str, width: i32, height: i32) -> Result<bool> {
    anyhow::bail!(
        "Window resizing is only supported on Windows (window {:?}, {}x{})",
        keyword,
        width,
        height
    )
}
