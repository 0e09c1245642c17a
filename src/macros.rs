//===========================================================================//

macro_rules! format_error {
    ($e:expr) => {
        return Err($crate::error::IcoError::Format(::std::string::String::from(
            $e
        )))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::error::IcoError::Format(format!($fmt, $($arg)+)))
    };
}

macro_rules! image_error {
    ($e:expr) => {
        return Err($crate::error::IcoError::InvalidImage(
            ::std::string::String::from($e)
        ))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::error::IcoError::InvalidImage(
            format!($fmt, $($arg)+)
        ))
    };
}

//===========================================================================//
