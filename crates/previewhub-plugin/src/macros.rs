//! Convenience macros for plugin development.

/// Macro for creating a `PluginInfo` struct.
///
/// # Example
/// ```rust,ignore
/// let info = plugin_info!(
///     name: "image-preview",
///     version: "1.0.0",
///     description: "Renders raster images",
///     types: ["image/*"],
///     extensions: [".png", ".jpg"]
/// );
/// ```
#[macro_export]
macro_rules! plugin_info {
    (
        name: $name:expr,
        version: $version:expr,
        description: $desc:expr
    ) => {
        $crate::prelude::PluginInfo {
            name: $name.to_string(),
            version: $version.to_string(),
            description: $desc.to_string(),
            supported_types: Vec::new(),
            supported_extensions: Vec::new(),
        }
    };
    (
        name: $name:expr,
        version: $version:expr,
        description: $desc:expr,
        types: [$($ty:expr),* $(,)?]
    ) => {
        $crate::prelude::PluginInfo {
            name: $name.to_string(),
            version: $version.to_string(),
            description: $desc.to_string(),
            supported_types: vec![$($ty.to_string()),*],
            supported_extensions: Vec::new(),
        }
    };
    (
        name: $name:expr,
        version: $version:expr,
        description: $desc:expr,
        types: [$($ty:expr),* $(,)?],
        extensions: [$($ext:expr),* $(,)?]
    ) => {
        $crate::prelude::PluginInfo {
            name: $name.to_string(),
            version: $version.to_string(),
            description: $desc.to_string(),
            supported_types: vec![$($ty.to_string()),*],
            supported_extensions: vec![$($ext.to_string()),*],
        }
    };
}

/// Macro for quickly building a `HookPayload`.
///
/// # Example
/// ```rust,ignore
/// let payload = hook_payload!(HookPoint::OnZoom, {
///     "scale" => json!(1.5),
///     "origin" => json!("toolbar"),
/// });
/// ```
#[macro_export]
macro_rules! hook_payload {
    ($hook:expr) => {
        $crate::prelude::HookPayload::new($hook)
    };
    ($hook:expr, { $($key:expr => $value:expr),* $(,)? }) => {{
        let mut payload = $crate::prelude::HookPayload::new($hook);
        $(
            payload.data.insert($key.to_string(), $value);
        )*
        payload
    }};
}
