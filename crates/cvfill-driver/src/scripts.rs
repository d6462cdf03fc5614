//! JavaScript snippets executed in the page via `execute/sync`.
//!
//! Element arguments arrive as `arguments[n]`; DOM elements returned from a
//! snippet come back as WebDriver element references.

/// Write a value through the native property setter so that framework
/// change-tracking (React, Angular) observes it, then dispatch a bubbling
/// `input` event. args: element, value.
pub const SET_VALUE_NATIVE: &str = r"
const el = arguments[0];
const value = arguments[1];
const proto = el.tagName === 'TEXTAREA'
  ? window.HTMLTextAreaElement.prototype
  : window.HTMLInputElement.prototype;
const descriptor = Object.getOwnPropertyDescriptor(proto, 'value');
if (descriptor && descriptor.set) {
  descriptor.set.call(el, value);
} else {
  el.value = value;
}
el.dispatchEvent(new Event('input', { bubbles: true }));
";

/// args: element.
pub const DISPATCH_CHANGE: &str =
    r"arguments[0].dispatchEvent(new Event('change', { bubbles: true }));";

/// args: element.
pub const DISPATCH_BLUR: &str =
    r"arguments[0].dispatchEvent(new Event('blur', { bubbles: true }));";

/// args: element.
pub const FOCUS: &str = r"arguments[0].focus();";

/// Pick the first `<option>` whose text contains the wanted string
/// (case-insensitive) and commit it with a `change` event.
/// args: select element, wanted text. Returns whether an option matched.
pub const SELECT_NATIVE_OPTION: &str = r"
const select = arguments[0];
const wanted = String(arguments[1]).toLowerCase();
for (const option of select.options) {
  if (option.textContent.toLowerCase().includes(wanted)) {
    select.value = option.value;
    select.dispatchEvent(new Event('change', { bubbles: true }));
    return true;
  }
}
return false;
";

/// Collect every checkbox under the scope selector (whole document when
/// null) together with its label text and checked state.
/// args: scope selector or null. Returns `[{element, label, checked}]`.
pub const COLLECT_CHECKBOXES: &str = r#"
const scope = arguments[0] ? document.querySelector(arguments[0]) : document;
if (!scope) { return []; }
const boxes = [];
for (const input of scope.querySelectorAll('input[type="checkbox"]')) {
  let label = '';
  const wrapping = input.closest('label');
  if (wrapping) {
    label = wrapping.textContent;
  } else if (input.id) {
    const forLabel = document.querySelector('label[for="' + CSS.escape(input.id) + '"]');
    if (forLabel) { label = forLabel.textContent; }
  }
  boxes.push({ element: input, label: label.trim(), checked: input.checked });
}
return boxes;
"#;

/// Find a form control by the text of its label, either via `for=` or by
/// nesting. args: label substring (case-insensitive). Returns the control
/// element or null.
pub const FIND_BY_LABEL: &str = r"
const wanted = String(arguments[0]).toLowerCase();
for (const label of document.querySelectorAll('label')) {
  if (!label.textContent.toLowerCase().includes(wanted)) { continue; }
  if (label.htmlFor) {
    const control = document.getElementById(label.htmlFor);
    if (control) { return control; }
  }
  const nested = label.querySelector('input, textarea, select');
  if (nested) { return nested; }
}
return null;
";

/// args: key. Returns the stored string or null.
pub const SESSION_STORAGE_GET: &str = r"return window.sessionStorage.getItem(arguments[0]);";

/// args: key, value.
pub const SESSION_STORAGE_SET: &str =
    r"window.sessionStorage.setItem(arguments[0], arguments[1]);";

/// args: key. Returns the stored string or null.
pub const LOCAL_STORAGE_GET: &str = r"return window.localStorage.getItem(arguments[0]);";

/// args: key, value.
pub const LOCAL_STORAGE_SET: &str = r"window.localStorage.setItem(arguments[0], arguments[1]);";

/// Whether the current document was loaded by a reload navigation.
pub const NAV_WAS_RELOAD: &str = r"
const entries = performance.getEntriesByType('navigation');
return entries.length > 0 && entries[0].type === 'reload';
";

/// IANA timezone of the browser, e.g. `Europe/Warsaw`.
pub const BROWSER_TIMEZONE: &str =
    r"return Intl.DateTimeFormat().resolvedOptions().timeZone;";

/// Transient corner notification. args: message, success flag.
pub const SHOW_NOTIFICATION: &str = r"
const note = document.createElement('div');
note.textContent = arguments[0];
note.style.cssText = 'position:fixed;top:16px;right:16px;z-index:2147483647;'
  + 'padding:12px 20px;border-radius:6px;color:#fff;font-family:sans-serif;'
  + 'font-size:14px;box-shadow:0 2px 8px rgba(0,0,0,0.3);'
  + 'background:' + (arguments[1] ? '#2e7d32' : '#c62828') + ';';
document.body.appendChild(note);
setTimeout(() => note.remove(), 5000);
";
