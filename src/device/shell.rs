//! Windows shell namespace adapter
//!
//! Phones connected over MTP do not get a drive letter; they only exist as
//! items in the shell namespace under "This PC". This module walks them with
//! `IShellFolder`, reads sizes through `IShellFolder2::GetDetailsEx` and
//! copies with `SHFileOperationW`.

use crate::core::error::{Result, SyncError};
use crate::device::traits::{
    CopyOutcome, FolderEntry, ItemCopierTrait, NamespaceItem, ShellFolderTrait,
    ShellNamespaceTrait,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::ptr::null_mut;
use windows::{
    core::{Interface, PCWSTR, PWSTR},
    Win32::{
        Foundation::{HWND, S_OK},
        Storage::EnhancedStorage::PKEY_Size,
        System::{
            Com::{CoInitializeEx, CoTaskMemFree, CoUninitialize, COINIT_APARTMENTTHREADED},
            Variant::VariantToStringAlloc,
        },
        UI::Shell::{
            Common::{ITEMIDLIST, STRRET},
            FOLDERID_ComputerFolder, IEnumIDList, IShellFolder, IShellFolder2,
            SHFileOperationW, SHGetDesktopFolder, SHGetKnownFolderIDList, SHParseDisplayName,
            StrRetToStrW, KF_FLAG_DEFAULT, SHCONTF_FOLDERS, SHCONTF_NONFOLDERS, SHFILEOPSTRUCTW,
            SHGDNF, SHGDN_FORPARSING, SHGDN_INFOLDER,
        },
    },
};

/// `SFGAO_FOLDER` attribute bit
const SFGAO_FOLDER: u32 = 0x2000_0000;

/// `SHFileOperationW` copy function
const FO_COPY: u32 = 0x0002;

/// Create missing destination directories without asking
const FOF_NOCONFIRMMKDIR: u16 = 0x0200;

/// Encode a string as a NUL-terminated UTF-16 buffer
fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// An item ID list allocated by the shell, freed on drop
struct Pidl(*mut ITEMIDLIST);

impl Pidl {
    fn as_ptr(&self) -> *const ITEMIDLIST {
        self.0
    }
}

impl Drop for Pidl {
    fn drop(&mut self) {
        if !self.0.is_null() {
            unsafe { CoTaskMemFree(Some(self.0 as *const _)) };
        }
    }
}

/// Enumerate the child ID lists of a folder
fn enumerate_pidls(folder: &IShellFolder, flags: u32, location: &str) -> Result<Vec<Pidl>> {
    let to_error = |e: windows::core::Error| SyncError::Enumeration {
        location: location.to_string(),
        message: e.to_string(),
    };

    unsafe {
        let mut enum_list: Option<IEnumIDList> = None;
        folder
            .EnumObjects(HWND::default(), flags, &mut enum_list)
            .ok()
            .map_err(to_error)?;

        // S_FALSE with no enumerator means the folder is empty
        let Some(enum_list) = enum_list else {
            return Ok(Vec::new());
        };

        let mut pidls = Vec::new();
        loop {
            let mut item = [null_mut::<ITEMIDLIST>(); 1];
            let mut fetched: u32 = 0;
            let hr = enum_list.Next(&mut item, Some(&mut fetched));
            hr.ok().map_err(to_error)?;

            if hr != S_OK || fetched == 0 {
                break;
            }
            pidls.push(Pidl(item[0]));
        }

        Ok(pidls)
    }
}

/// Read a display name of a child item
fn display_name(folder: &IShellFolder, pidl: &Pidl, flags: SHGDNF) -> windows::core::Result<String> {
    unsafe {
        let mut strret = STRRET::default();
        folder.GetDisplayNameOf(pidl.as_ptr(), flags, &mut strret)?;

        let mut pwstr = PWSTR::null();
        StrRetToStrW(&mut strret, Some(pidl.as_ptr()), &mut pwstr)?;
        let name = pwstr.to_string().unwrap_or_default();
        CoTaskMemFree(Some(pwstr.0 as *const _));
        Ok(name)
    }
}

/// A folder handle in the shell namespace
pub struct ShellFolder {
    folder: IShellFolder,
    location: String,
    /// Child ID lists from the last enumeration, keyed by in-folder name
    children: RefCell<Vec<(String, Pidl)>>,
}

impl ShellFolder {
    fn new(folder: IShellFolder, location: String) -> Self {
        Self {
            folder,
            location,
            children: RefCell::new(Vec::new()),
        }
    }

    /// Bind a folder from its parsing name (as produced by the locator)
    pub fn from_parsing_name(path: &Path) -> Result<Self> {
        let location = path.display().to_string();
        unsafe {
            let desktop = SHGetDesktopFolder()?;

            let wide = to_wide(&location);
            let mut raw: *mut ITEMIDLIST = null_mut();
            SHParseDisplayName(PCWSTR(wide.as_ptr()), None, &mut raw, 0, None).map_err(|e| {
                SyncError::Bind {
                    parent: "Desktop".to_string(),
                    name: location.clone(),
                    message: e.to_string(),
                }
            })?;
            let pidl = Pidl(raw);

            let folder: IShellFolder = desktop.BindToObject(pidl.as_ptr(), None)?;
            Ok(Self::new(folder, location))
        }
    }

    /// Run `f` with the ID list of a named child, enumerating first if needed
    fn with_child<T>(&self, name: &str, f: impl FnOnce(&Pidl) -> Result<T>) -> Result<T> {
        if self.children.borrow().is_empty() {
            self.entries()?;
        }

        let children = self.children.borrow();
        let (_, pidl) = children
            .iter()
            .find(|(child, _)| child == name)
            .ok_or_else(|| SyncError::Bind {
                parent: self.location.clone(),
                name: name.to_string(),
                message: "item not found".to_string(),
            })?;
        f(pidl)
    }
}

impl ShellFolderTrait for ShellFolder {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn entries(&self) -> Result<Vec<FolderEntry>> {
        let flags = (SHCONTF_FOLDERS.0 | SHCONTF_NONFOLDERS.0) as u32;
        let pidls = enumerate_pidls(&self.folder, flags, &self.location)?;

        let mut entries = Vec::with_capacity(pidls.len());
        let mut children = Vec::with_capacity(pidls.len());
        for pidl in pidls {
            let name = display_name(&self.folder, &pidl, SHGDN_INFOLDER).map_err(|e| {
                SyncError::Enumeration {
                    location: self.location.clone(),
                    message: e.to_string(),
                }
            })?;

            let mut attrs = SFGAO_FOLDER;
            unsafe {
                self.folder
                    .GetAttributesOf(&[pidl.as_ptr()], &mut attrs)
                    .map_err(|e| SyncError::Enumeration {
                        location: self.location.clone(),
                        message: e.to_string(),
                    })?;
            }

            entries.push(FolderEntry {
                name: name.clone(),
                is_folder: attrs & SFGAO_FOLDER != 0,
            });
            children.push((name, pidl));
        }

        *self.children.borrow_mut() = children;
        Ok(entries)
    }

    fn open_subfolder(&self, name: &str) -> Result<Self> {
        self.with_child(name, |pidl| {
            let folder: IShellFolder = unsafe { self.folder.BindToObject(pidl.as_ptr(), None) }
                .map_err(|e| SyncError::Bind {
                    parent: self.location.clone(),
                    name: name.to_string(),
                    message: e.to_string(),
                })?;
            Ok(Self::new(folder, format!("{}\\{}", self.location, name)))
        })
    }

    fn displayed_size(&self, name: &str) -> Result<Option<String>> {
        self.with_child(name, |pidl| {
            let to_error = |e: windows::core::Error| SyncError::Property {
                location: self.location.clone(),
                name: name.to_string(),
                message: e.to_string(),
            };

            unsafe {
                let folder2: IShellFolder2 = self.folder.cast().map_err(to_error)?;
                let value = folder2
                    .GetDetailsEx(pidl.as_ptr(), &PKEY_Size)
                    .map_err(to_error)?;

                let pwstr = VariantToStringAlloc(&value).map_err(to_error)?;
                let text = pwstr.to_string().unwrap_or_default();
                CoTaskMemFree(Some(pwstr.0 as *const _));

                Ok(if text.is_empty() { None } else { Some(text) })
            }
        })
    }

    fn item_path(&self, name: &str) -> Result<String> {
        self.with_child(name, |pidl| {
            display_name(&self.folder, pidl, SHGDN_FORPARSING).map_err(|e| SyncError::Property {
                location: self.location.clone(),
                name: name.to_string(),
                message: e.to_string(),
            })
        })
    }
}

/// The "This PC" folder, where connected phones appear
pub struct ShellNamespace {
    folder: IShellFolder,
}

impl ShellNamespace {
    /// Bind the "This PC" known folder
    pub fn computer() -> Result<Self> {
        unsafe {
            let desktop = SHGetDesktopFolder()?;
            let pidl = Pidl(SHGetKnownFolderIDList(
                &FOLDERID_ComputerFolder,
                KF_FLAG_DEFAULT.0 as u32,
                None,
            )?);
            let folder: IShellFolder = desktop.BindToObject(pidl.as_ptr(), None)?;
            Ok(Self { folder })
        }
    }
}

impl ShellNamespaceTrait for ShellNamespace {
    fn items(&self) -> Result<Vec<NamespaceItem>> {
        let pidls = enumerate_pidls(&self.folder, SHCONTF_FOLDERS.0 as u32, "This PC")?;

        let mut items = Vec::with_capacity(pidls.len());
        for pidl in &pidls {
            let display = display_name(&self.folder, pidl, SHGDN_INFOLDER)?;
            let parsing = display_name(&self.folder, pidl, SHGDN_FORPARSING)?;
            items.push(NamespaceItem {
                display_name: display,
                parsing_path: PathBuf::from(parsing),
            });
        }
        Ok(items)
    }
}

/// Copies through the shell so device items can be read
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellCopier;

impl ItemCopierTrait for ShellCopier {
    fn copy_item(&self, source: &str, dest: &Path) -> CopyOutcome {
        // Both lists must be double NUL terminated
        let mut from = to_wide(source);
        from.push(0);
        let mut to = to_wide(&dest.display().to_string());
        to.push(0);

        let mut op = SHFILEOPSTRUCTW {
            wFunc: FO_COPY,
            pFrom: PCWSTR(from.as_ptr()),
            pTo: PCWSTR(to.as_ptr()),
            fFlags: FOF_NOCONFIRMMKDIR,
            ..Default::default()
        };

        let code = unsafe { SHFileOperationW(&mut op) };
        CopyOutcome {
            code,
            aborted: op.fAnyOperationsAborted.as_bool(),
        }
    }
}

/// RAII guard for COM initialization
pub struct ComGuard;

impl Drop for ComGuard {
    fn drop(&mut self) {
        unsafe {
            CoUninitialize();
        }
    }
}

/// Initialize COM in a single-threaded apartment, as the shell requires
///
/// COM stays initialized until the returned guard is dropped.
pub fn initialize_com() -> Result<ComGuard> {
    unsafe {
        CoInitializeEx(None, COINIT_APARTMENTTHREADED).ok()?;
    }
    Ok(ComGuard)
}
