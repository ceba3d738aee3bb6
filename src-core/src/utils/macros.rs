// FICHIER : src-core/src/utils/macros.rs

/// Lève une erreur structurée (`AppError::Structured`) et la trace.
/// S'utilise comme expression de type `!` : `Err(e) => vitrine_error!("ERR_X", error = e)`.
#[macro_export]
macro_rules! vitrine_error {
    ($code:expr, error = $err:expr, context = $ctx:expr) => {{
        let data = $crate::utils::error::StructuredError::new($code, $err.to_string(), $ctx);
        tracing::error!(
            code = %data.code,
            component = %data.component,
            context = %data.context,
            "{}",
            data.message
        );
        return Err($crate::utils::error::AppError::Structured(data).into());
    }};
    ($code:expr, error = $err:expr) => {
        $crate::vitrine_error!(
            $code,
            error = $err,
            context = $crate::utils::json::Value::Null
        )
    };
}

/// Affiche une info à l'utilisateur (traduite) et logue l'événement
#[macro_export]
macro_rules! user_info {
    ($key:expr) => {{
        let msg = $crate::utils::i18n::t($key);
        println!("{}", msg);
        tracing::info!(event = "user_notification", key = $key, message = %msg);
    }};
    ($key:expr, $($arg:tt)*) => {{
        let args_formatted = format!($($arg)*);
        let full_msg = format!("{} {}", $crate::utils::i18n::t($key), args_formatted);
        println!("{}", full_msg);
        tracing::info!(event = "user_notification", key = $key, message = %full_msg);
    }};
}

/// Affiche un succès à l'utilisateur
#[macro_export]
macro_rules! user_success {
    ($key:expr) => {{
        let msg = $crate::utils::i18n::t($key);
        println!("✅ {}", msg);
        tracing::info!(event = "user_success", key = $key, message = %msg);
    }};
    ($key:expr, $($arg:tt)*) => {{
        let args_formatted = format!($($arg)*);
        let full_msg = format!("{} {}", $crate::utils::i18n::t($key), args_formatted);
        println!("✅ {}", full_msg);
        tracing::info!(event = "user_success", key = $key, message = %full_msg);
    }};
}

/// Avertissement transitoire (accès refusé, connexion requise...)
#[macro_export]
macro_rules! user_warn {
    ($key:expr) => {{
        let msg = $crate::utils::i18n::t($key);
        eprintln!("⚠️ {}", msg);
        tracing::warn!(event = "user_warning", key = $key, message = %msg);
    }};
    ($key:expr, $($arg:tt)*) => {{
        let args_formatted = format!($($arg)*);
        let full_msg = format!("{} {}", $crate::utils::i18n::t($key), args_formatted);
        eprintln!("⚠️ {}", full_msg);
        tracing::warn!(event = "user_warning", key = $key, message = %full_msg);
    }};
}

/// Affiche une erreur à l'utilisateur ET logue la structure technique
#[macro_export]
macro_rules! user_error {
    ($key:expr) => {{
        let msg = $crate::utils::i18n::t($key);
        eprintln!("❌ {}", msg);
        tracing::error!(event = "user_error", key = $key, message = %msg);
    }};

    // Format enrichi : composant + action
    (
        $key:expr,
        error = $err:expr,
        component = $comp:expr,
        action = $action:expr
    ) => {{
        let msg = $crate::utils::i18n::t($key);
        eprintln!("❌ [{}] {} : {}", $comp, msg, $err);
        tracing::error!(
            service = "vitrine", componentName = $comp, action = $action,
            reason = %msg, error = ?$err,
            event = "user_error", key = $key
        );
    }};

    // Clé + arguments de formatage (toujours en dernier)
    ($key:expr, $($arg:tt)*) => {{
        let args_formatted = format!($($arg)*);
        let full_msg = format!("{} {}", $crate::utils::i18n::t($key), args_formatted);
        eprintln!("❌ {}", full_msg);
        tracing::error!(event = "user_error", key = $key, message = %full_msg);
    }};
}
