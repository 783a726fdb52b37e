//! Anonymous memory region

// Imports
use {
	anyhow::Context,
	nix::{
		errno::Errno,
		sys::mman::{self, MapFlags, ProtFlags},
		unistd::{self, SysconfVar},
	},
	std::{ffi::c_void, num::NonZeroUsize, ptr::NonNull},
};

/// An exclusively-owned anonymous memory region.
///
/// Reserved once as a single contiguous mapping, then perturbed one
/// page at a time via [`Self::remap_page`] and [`Self::unmap_page`].
/// The whole span stays reserved for the region's lifetime, no matter
/// how its pages have been replaced or released in the meantime.
#[derive(Debug)]
pub struct Region {
	/// Base address
	base: NonNull<c_void>,

	/// Length, in bytes
	len: usize,

	/// System page size
	page_size: usize,
}

impl Region {
	/// Reserves a new region of `len` bytes.
	///
	/// `len` must be a non-zero multiple of the system page size.
	pub fn reserve(len: usize) -> Result<Self, anyhow::Error> {
		let page_size = self::page_size().context("Unable to get system page size")?;
		if len == 0 || len % page_size != 0 {
			return Err(anyhow::Error::new(Errno::EINVAL).context(format!(
				"Region length {len:#x} must be a non-zero multiple of the page size {page_size:#x}"
			)));
		}

		let len_non_zero = NonZeroUsize::new(len).expect("Length was checked to be non-zero");

		// SAFETY: We're creating a fresh anonymous mapping at a kernel-chosen address.
		let base = unsafe {
			mman::mmap_anonymous(
				None,
				len_non_zero,
				ProtFlags::PROT_WRITE,
				MapFlags::MAP_PRIVATE | MapFlags::MAP_POPULATE,
			)
		}
		.context("Unable to reserve region")?;

		Ok(Self { base, len, page_size })
	}

	/// Replaces the page at `offset` with a fresh, zero-filled anonymous mapping.
	///
	/// The mapping is requested at the page's exact address. A successful
	/// mapping landing anywhere else is an invariant violation and is
	/// reported as an error without an underlying [`Errno`].
	pub fn remap_page(&mut self, offset: usize) -> Result<(), anyhow::Error> {
		let addr = self.page_addr(offset);
		let page_len = NonZeroUsize::new(self.page_size).expect("Page size is non-zero");

		// SAFETY: `addr` lies within our exclusively-owned span, so `MAP_FIXED`
		//         only ever replaces pages we own.
		let ret_addr = unsafe {
			mman::mmap_anonymous(
				Some(addr),
				page_len,
				ProtFlags::PROT_WRITE,
				MapFlags::MAP_PRIVATE | MapFlags::MAP_FIXED | MapFlags::MAP_POPULATE,
			)
		}
		.context("Unable to remap page")?;

		anyhow::ensure!(
			ret_addr.as_ptr() as usize == addr.get(),
			"Remap address mismatch: {:#x} vs. {:#x}",
			ret_addr.as_ptr() as usize,
			addr.get(),
		);

		Ok(())
	}

	/// Releases the page at `offset`.
	///
	/// Releasing a page that is already released is fine, `munmap`
	/// ignores holes in the range.
	pub fn unmap_page(&mut self, offset: usize) -> Result<(), anyhow::Error> {
		let addr = self.page_addr(offset);
		let ptr = NonNull::new(addr.get() as *mut c_void).expect("Page address is non-null");

		// SAFETY: The page lies within our exclusively-owned span.
		unsafe { mman::munmap(ptr, self.page_size) }.context("Unable to unmap page")?;

		Ok(())
	}

	/// Returns the base address of this region
	pub fn base_addr(&self) -> usize {
		self.base.as_ptr() as usize
	}

	/// Returns the length of this region, in bytes
	pub fn len(&self) -> usize {
		self.len
	}

	/// Returns whether this region is empty.
	///
	/// Always false, [`Self::reserve`] rejects zero lengths.
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Returns the system page size this region was reserved with
	pub fn page_size(&self) -> usize {
		self.page_size
	}

	/// Returns the number of pages in this region
	pub fn page_count(&self) -> usize {
		self.len / self.page_size
	}

	/// Returns the address of the page at `offset`.
	///
	/// `offset` must be page-aligned and in bounds, the churn loop
	/// only ever generates such offsets.
	fn page_addr(&self, offset: usize) -> NonZeroUsize {
		assert!(
			offset < self.len,
			"Offset {offset:#x} is out of bounds for a region of length {:#x}",
			self.len
		);
		assert_eq!(offset % self.page_size, 0, "Offset {offset:#x} isn't page-aligned");

		NonZeroUsize::new(self.base.as_ptr() as usize + offset).expect("Region base is non-null")
	}
}

impl Drop for Region {
	fn drop(&mut self) {
		// SAFETY: We own the whole span and it's unused past this point.
		if let Err(err) = unsafe { mman::munmap(self.base, self.len) } {
			tracing::warn!("Unable to unmap region: {err}");
		}
	}
}

/// Returns the system page size
pub fn page_size() -> Result<usize, anyhow::Error> {
	let page_size = unistd::sysconf(SysconfVar::PAGE_SIZE)
		.context("Unable to query page size")?
		.context("Page size is indeterminate")?;
	usize::try_from(page_size).context("Page size doesn't fit a usize")
}
